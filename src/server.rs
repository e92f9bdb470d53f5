use crate::{args::Args, config, env_vars};
use std::env;

/// Print startup banner with configuration
pub fn print_startup_info(args: &Args) {
    if args.quiet {
        // Quiet mode: only essential information
        println!(
            "🚀 headwise v{} starting on port {}",
            env!("CARGO_PKG_VERSION"),
            args.listen
        );
        return;
    }

    // Normal/verbose mode: full configuration display
    println!("🧭 {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("   {}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("📡 Network Configuration:");
    println!("   Bind Address:   {}", args.bind);
    println!("   Listen Port:    {}", args.listen);
    println!();

    println!("🗂️  Negotiation:");
    println!(
        "   Content Types:  {}",
        config::get_available_content_types().join(", ")
    );
    println!(
        "   Languages:      {}",
        config::get_available_languages().join(", ")
    );

    print_trust_config();

    // Show environment configuration in verbose mode
    if args.verbose {
        print_env_config();
    }

    println!();
    println!("🚀 Server starting...");
}

/// Print client IP trust configuration summary
fn print_trust_config() {
    let client_ip = config::get_client_ip_config();

    println!("🔒 Client IP Resolution:");

    if client_ip.check_proxy_headers && !client_ip.trusted_proxies.is_empty() {
        println!(
            "   Mode:           Proxy-aware (trusted proxies: {})",
            client_ip.trusted_proxies.len()
        );
        println!("   Headers:        {}", client_ip.headers_to_inspect.join(", "));
        println!("   Chain:          {}", client_ip.chain_selection);
    } else {
        println!("   Mode:           Peer address only (forwarding headers ignored)");
    }

    println!("   Attribute:      {}", client_ip.attribute_name);
}

/// Print environment variable configuration status (used in verbose mode)
fn print_env_config() {
    println!();
    println!("🔧 Environment Variables:");

    for &var_name in env_vars::all_env_vars() {
        match env::var(var_name) {
            Ok(value) => {
                // Mask sensitive values
                let display_value = if var_name.contains("PROXY_IPS") {
                    "[CONFIGURED]".to_string()
                } else {
                    value
                };
                println!("   {:<27} = {}", var_name, display_value);
            }
            Err(_) => {
                println!("   {:<27} = [NOT SET]", var_name);
            }
        }
    }
}
