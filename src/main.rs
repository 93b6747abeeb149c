use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::bail;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use savitb::config_loader;
use savitb::topology::Endpoint;
use savitb::utils::lint;
use savitb::{DefaultsOverrides, Testbed};

/// Load, inspect and check SAVI SDN testbed configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the defaults YAML file (built-in defaults if omitted)
    #[arg(short, long, global = true)]
    defaults: Option<PathBuf>,

    /// Path to the topology YAML file (built-in topology if omitted)
    #[arg(short, long, global = true)]
    topology: Option<PathBuf>,

    /// Override the username; the private key path follows it
    #[arg(long, global = true)]
    username: Option<String>,

    /// Override the password
    #[arg(long, global = true)]
    password: Option<String>,

    /// Override the tenant name
    #[arg(long, global = true)]
    tenant: Option<String>,

    /// Override the default region
    #[arg(long, global = true)]
    region: Option<String>,

    /// Override the key-pair name
    #[arg(long, global = true)]
    key_name: Option<String>,

    /// Override the instance name prefix
    #[arg(long, global = true)]
    instance_prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the loaded testbed
    Show {
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Report usage problems in the topology
    Check {
        /// Exit with an error if any warning is found
        #[arg(long)]
        strict: bool,
    },
    /// Print one line per link
    Links,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl Args {
    fn overrides(&self) -> DefaultsOverrides {
        DefaultsOverrides {
            username: self.username.clone(),
            password: self.password.clone(),
            tenant_name: self.tenant.clone(),
            region_name: self.region.clone(),
            key_name: self.key_name.clone(),
            instance_prefix: self.instance_prefix.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let loaded = config_loader::load_testbed(args.defaults.as_deref(), args.topology.as_deref())?;
    let testbed = Testbed::new(loaded.defaults.apply_overrides(&args.overrides()), loaded.topology);

    match args.command {
        Command::Show { format } => {
            let output = match format {
                Format::Yaml => testbed.to_yaml()?,
                Format::Json => testbed.to_json()?,
            };
            println!("{}", output);
        }
        Command::Check { strict } => {
            let warnings = lint(&testbed);
            for warning in &warnings {
                warn!("{}", warning);
            }
            let summary = testbed.summary();
            info!(
                "{} switches, {} hosts, {} switch links, {} host links",
                summary.switches, summary.hosts, summary.switch_links, summary.host_links
            );
            if strict && !warnings.is_empty() {
                bail!("Topology check found {} warning(s)", warnings.len());
            }
        }
        Command::Links => {
            for (switch, endpoints) in &testbed.topology.topology {
                for endpoint in endpoints {
                    match endpoint {
                        Endpoint::SwitchLink(peer) => println!("{} <-> {}", switch, peer),
                        Endpoint::HostLink(link) => match &link.bridge_name {
                            Some(bridge) => {
                                println!("{} -> {} {} via {}", switch, link.host, link.port, bridge)
                            }
                            None => println!("{} -> {} {}", switch, link.host, link.port),
                        },
                    }
                }
            }
        }
    }

    Ok(())
}
