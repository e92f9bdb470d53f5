//! Command line argument parsing for headwise.
//!
//! This module defines the CLI interface using [`clap`] for argument parsing.
//! It provides configuration for the binding address, port, and output verbosity.
//!
//! # Example
//!
//! ```no_run
//! use headwise::args::Args;
//! use clap::Parser;
//!
//! let args = Args::parse();
//! if let Err(e) = args.validate() {
//!     eprintln!("Configuration error: {}", e);
//!     std::process::exit(1);
//! }
//! ```

use clap::Parser;

/// Command line arguments for headwise.
///
/// Arguments can be provided via command line flags or environment variables.
///
/// # Fields
///
/// * `bind` - Address to bind for listening (default: "0.0.0.0")
/// * `listen` - Port to listen on for incoming requests
/// * `verbose` - Enable detailed configuration output
/// * `quiet` - Suppress non-essential output (conflicts with verbose)
/// * `json_logs` - Output logs in JSON format for structured logging
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Reports the negotiated representation and the resolved client address of every request\n\nExample usage:\n  headwise --listen 8080\n  CHECK_PROXY_HEADERS=true TRUSTED_PROXY_IPS=10.0.0.1 headwise -l 8080 --verbose"
)]
#[command(
    after_help = "Environment variables:\n  CHECK_PROXY_HEADERS        Consult forwarding headers (default: false)\n  TRUSTED_PROXY_IPS          Comma-separated trusted proxy IPs\n  PROXY_HEADERS              Forwarding headers to inspect, in priority order\n  FORWARDED_CHAIN_SELECTION  leftmost (default) or rightmost-untrusted\n  CLIENT_IP_ATTRIBUTE        Request attribute name (default: ip_address)\n  AVAILABLE_CONTENT_TYPES    Offered media types (default: text/plain,text/html)\n  AVAILABLE_LANGUAGES        Offered languages (default: en)"
)]
pub struct Args {
    /// Address to bind to
    #[arg(
        long,
        short = 'b',
        env = "HEADWISE_BIND",
        help = "Bind address for listening",
        value_name = "ADDRESS",
        default_value = "0.0.0.0"
    )]
    pub bind: String,

    /// Port to listen on for incoming requests
    #[arg(
        long,
        short = 'l',
        env = "HEADWISE_LISTEN",
        help = "Listen port for incoming connections",
        value_name = "PORT",
        default_value_t = 8080
    )]
    pub listen: u16,

    /// Enable verbose output
    #[arg(
        long,
        short = 'v',
        help = "Show detailed configuration and startup information"
    )]
    pub verbose: bool,

    /// Enable quiet mode (minimal output)
    #[arg(
        long,
        short = 'q',
        help = "Suppress configuration output, show only essential messages",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output logs in JSON format (for structured logging)
    #[arg(long, help = "Output logs in JSON format for structured logging")]
    pub json_logs: bool,
}

impl Args {
    /// Validates the parsed command line arguments.
    ///
    /// Performs the following validations:
    /// - The listen port must be greater than 0
    /// - Bind address must be a valid IP address
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If all arguments are valid
    /// * `Err(String)` - A descriptive error message if validation fails
    ///
    /// # Example
    ///
    /// ```
    /// use headwise::args::Args;
    /// use clap::Parser;
    ///
    /// let args = Args::try_parse_from(["headwise", "-l", "0"]).unwrap();
    /// assert!(args.validate().is_err());
    ///
    /// let args = Args::try_parse_from(["headwise", "-l", "8080"]).unwrap();
    /// assert!(args.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.listen == 0 {
            return Err("Listen port must be greater than 0".to_string());
        }

        // Validate bind address format
        if self.bind.parse::<std::net::IpAddr>().is_err() {
            return Err(format!("Invalid bind address: '{}'", self.bind));
        }

        Ok(())
    }

    /// Socket address to listen on. Only meaningful after [`Args::validate`].
    pub fn listen_addr(&self) -> Result<std::net::SocketAddr, String> {
        let ip: std::net::IpAddr = self
            .bind
            .parse()
            .map_err(|_| format!("Invalid bind address: '{}'", self.bind))?;
        Ok(std::net::SocketAddr::from((ip, self.listen)))
    }
}
