use clap::{Parser, Subcommand};

/// Command-line interface definition for debtpix
/// Debt lookup + PIX payment web service with an admin CLI over SQLite
#[derive(Parser)]
#[command(
    name = "debtpix",
    version = env!("CARGO_PKG_VERSION"),
    about = "Debt lookup and PIX payment-code web service backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Run the HTTP server
    Serve {
        #[arg(long, help = "Address to bind, e.g. 0.0.0.0:3000")]
        bind: Option<String>,

        #[arg(long, help = "Asset mode: development or production")]
        mode: Option<String>,

        #[arg(long = "assets", value_name = "DIR", help = "Directory of the client bundle")]
        assets: Option<String>,
    },

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// List all debtors
    List,

    /// Replace the debtor list with the rows of a CSV file
    Import {
        #[arg(value_name = "FILE")]
        file: String,

        #[arg(long = "no-header", help = "Treat the first line as data")]
        no_header: bool,
    },

    /// Delete a debtor by phone
    Del {
        phone: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Delete all debtors and configuration
    Reset {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Show or update the PIX key and QR image
    Pix {
        #[arg(long, help = "New PIX key")]
        key: Option<String>,

        #[arg(long = "qr-file", value_name = "FILE", help = "Image file to store as QR code")]
        qr_file: Option<String>,
    },

    /// Print the SHA-256 to put in `admin_password_sha256`
    HashPassword { password: String },
}
