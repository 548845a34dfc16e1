//! CLI interface for reality-agent

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::agent::interactive::{print_learning_report, print_response, print_status, run_interactive};
use crate::agent::ConstraintAgent;
use crate::classifier::ConstraintClassifier;
use crate::config::{self, Config};

#[derive(Parser)]
#[command(name = "reality-agent")]
#[command(about = "Constraint-aware assistant that learns which answers work", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug logs and constraint analysis
    #[arg(long, global = true)]
    pub trace: bool,

    /// Configuration file (default: per-user config directory)
    #[arg(long, global = true, env = "REALITY_AGENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pattern store file, overriding the configuration
    #[arg(long, global = true, env = "REALITY_AGENT_STORE")]
    pub store: Option<PathBuf>,

    /// Keep learned patterns in memory only
    #[arg(long, global = true)]
    pub memory: bool,

    /// Classification rule table (TOML), overriding the configuration
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Do not seed demo patterns
    #[arg(long, global = true)]
    pub no_seed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a single request
    Ask {
        /// The request text
        text: String,
        /// Record whether the answer helped
        #[arg(long, value_parser = parse_feedback)]
        feedback: Option<bool>,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how a request is classified
    Classify {
        /// The request text
        text: String,
    },
    /// Start an interactive session with feedback prompts (default)
    Interactive,
    /// Run the scripted learning demonstration
    Demo,
    /// Inspect or clear learned patterns
    Patterns {
        #[command(subcommand)]
        command: PatternCommands,
    },
    /// Show or initialise configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum PatternCommands {
    /// List learned patterns
    List,
    /// Delete all learned patterns
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_feedback(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("expected yes or no, got '{}'", other)),
    }
}

impl Cli {
    /// Load the config file and apply command-line overrides
    fn effective_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(store) = &self.store {
            config.store.path = Some(store.clone());
            config.store.persist = true;
        }
        if self.memory {
            config.store.persist = false;
        }
        if let Some(rules) = &self.rules {
            config.classifier.rules_path = Some(rules.clone());
        }
        if self.no_seed {
            config.learning.seed_demo_patterns = false;
        }
        Ok(config)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.effective_config()?;

    match cli.command {
        None | Some(Commands::Interactive) => {
            let mut agent = ConstraintAgent::from_config(&config)?;
            run_interactive(&mut agent, cli.trace)?;
        }
        Some(Commands::Ask { text, feedback, json }) => {
            let mut agent = ConstraintAgent::from_config(&config)?;
            let response = agent.process_request(&text);

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&response, cli.trace);
            }

            if let Some(success) = feedback {
                agent.record_feedback(&text, &response, success);
                if !json {
                    println!();
                    println!("Feedback recorded ({})", if success { "helpful" } else { "not helpful" });
                }
            }
        }
        Some(Commands::Classify { text }) => {
            let rules = config.classifier.load_rules()?;
            let constraint = ConstraintClassifier::with_rules(rules).classify(&text);
            println!("Type:       {}", constraint.constraint_type);
            println!("Reality:    {:.2}", constraint.reality_level);
            println!("Mechanism:  {}", constraint.causal_mechanism);
            println!("Signature:  {}", constraint.signature());
        }
        Some(Commands::Demo) => {
            let mut agent = ConstraintAgent::from_config(&config)?;
            run_demo(&mut agent);
        }
        Some(Commands::Patterns { command }) => {
            let mut agent = ConstraintAgent::from_config(&config)?;
            match command {
                PatternCommands::List => list_patterns(&agent),
                PatternCommands::Clear { yes } => clear_patterns(&mut agent, yes)?,
            }
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => config::config_path()?,
                };
                println!("# {}", path.display());
                println!("{}", toml::to_string_pretty(&config).context("Failed to serialize config")?);
            }
            ConfigCommands::Init { force } => {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => config::config_path()?,
                };
                if path.exists() && !force {
                    anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
                }
                Config::default().save_to(&path)?;
                println!("Wrote default configuration to {}", path.display());
            }
        },
    }

    Ok(())
}

fn run_demo(agent: &mut ConstraintAgent) {
    let scenarios = [
        (
            "SCENARIO 1: High-Security Authentication Request",
            "I need to implement authentication with rate limiting for high security banking application",
        ),
        (
            "SCENARIO 2: Similar Security Request",
            "Build secure login system with request throttling for financial services",
        ),
        (
            "SCENARIO 3: Complex Enterprise Architecture",
            "Design complete microservice architecture with authentication, caching, monitoring, \
             logging, error handling, rate limiting, load balancing, database sharding, message \
             queuing, and distributed tracing for enterprise scale",
        ),
    ];

    println!("{}", "=".repeat(70));
    println!("🎬 LEARNING DEMONSTRATION");
    println!("{}", "=".repeat(70));

    for (title, request) in scenarios {
        println!();
        println!(">> {}", title);
        println!("{}", "-".repeat(70));
        let report = agent.demonstrate_learning(request, true);
        print_learning_report(&report);
    }

    println!();
    println!("{}", "=".repeat(70));
    print_status(&agent.status());
}

fn list_patterns(agent: &ConstraintAgent) {
    let learner = agent.learner();
    if learner.is_empty() {
        println!("No learned patterns.");
        return;
    }

    println!("{:<22} {:>8} {:>6}  {:<25} Summary", "Signature", "Success", "Uses", "Created");
    for pattern in learner.patterns() {
        println!(
            "{:<22} {:>7.1}% {:>6}  {:<25} {}",
            pattern.signature,
            pattern.success_rate * 100.0,
            pattern.usage_count,
            pattern.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            crate::truncate_safe(&pattern.method_summary.replace('\n', " "), 40)
        );
    }

    match learner.store().path() {
        Some(path) => println!("\nStore: {}", path.display()),
        None => println!("\nStore: in-memory only"),
    }
}

fn clear_patterns(agent: &mut ConstraintAgent, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let mut rl = rustyline::DefaultEditor::new()?;
        let answer = rl.readline(&format!(
            "Delete {} learned patterns? (y/N): ",
            agent.learned_pattern_count()
        ))?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if agent.clear_patterns() {
        println!("All learned patterns cleared.");
    } else {
        anyhow::bail!("Patterns cleared in memory, but the pattern file could not be removed");
    }
    Ok(())
}
