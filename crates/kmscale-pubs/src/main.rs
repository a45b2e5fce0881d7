//! kmscale-pubs CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "kmscale-pubs")]
#[command(version)]
#[command(about = "Render and maintain the km-scale publication catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the catalogs with the bibliography and write the tables
    Render {
        /// Project directory (defaults to the current directory)
        #[arg(short = 'd', long)]
        dir: Option<String>,

        /// Output format (markdown, html, json)
        #[arg(short = 't', long, default_value = "markdown")]
        to: String,

        /// Write output to FILE (use '--output -' for stdout)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Suppress console output
        #[arg(long)]
        quiet: bool,
    },

    /// Report catalog and bibliography problems
    Check {
        /// Project directory (defaults to the current directory)
        #[arg(short = 'd', long)]
        dir: Option<String>,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the PDF location of every bibliography entry
    PdfUrls {
        /// Project directory (defaults to the current directory)
        #[arg(short = 'd', long)]
        dir: Option<String>,
    },

    /// Print a BibTeX entry and catalog skeleton for an arXiv paper
    Scaffold {
        /// arXiv abs/pdf URL or arXiv id
        url: String,

        /// Paper title
        #[arg(long)]
        title: String,

        /// Authors, BibTeX style ("Last, First and Last, First")
        #[arg(long, default_value = "")]
        author: String,

        /// Publication year
        #[arg(long, default_value = "")]
        year: String,

        /// BibTeX key / catalog id to use
        #[arg(long)]
        id: Option<String>,

        /// Override the inferred catalog (forecasting, downscaling, global)
        #[arg(long)]
        category: Option<String>,

        /// arXiv primary class
        #[arg(long, default_value = "")]
        primary_class: String,

        /// Project directory (defaults to the current directory)
        #[arg(short = 'd', long)]
        dir: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Commands::Render { quiet: true, .. });
    let default_filter = if quiet {
        "error"
    } else {
        "kmscale_pubs=info,kmscale_core=warn"
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Render {
            dir,
            to,
            output,
            quiet,
        } => commands::render::execute(commands::render::RenderArgs {
            dir,
            to,
            output,
            quiet,
        }),
        Commands::Check { dir, json } => {
            commands::check::execute(commands::check::CheckArgs { dir, json })
        }
        Commands::PdfUrls { dir } => commands::pdf_urls::execute(dir),
        Commands::Scaffold {
            url,
            title,
            author,
            year,
            id,
            category,
            primary_class,
            dir,
        } => commands::scaffold::execute(commands::scaffold::ScaffoldArgs {
            url,
            title,
            author,
            year,
            id,
            category,
            primary_class,
            dir,
        }),
    }
}
