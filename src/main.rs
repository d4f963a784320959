use anyhow::Context;
use clap::Parser;
use raid_roster::config::{Command, OutputFormat};
use raid_roster::utils::{logger, validation::Validate};
use raid_roster::{chunk_lines, CliConfig, MemberId, RaidEngine, RosterError, ScenarioConfig};
use serde_json::json;

fn load_scenario(path: &str) -> raid_roster::Result<ScenarioConfig> {
    let scenario = ScenarioConfig::from_file(path)?;
    scenario.validate()?;
    Ok(scenario)
}

fn exit_with(e: &RosterError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting raid-roster");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    tracing::info!("📁 Loading scenario from: {}", config.scenario);
    let scenario = match load_scenario(&config.scenario) {
        Ok(scenario) => scenario,
        Err(e) => exit_with(&e),
    };

    let catalog = scenario.catalog()?;
    let target = scenario.target()?;
    let roster = scenario.roster();
    let requires_mentor = scenario.requires_mentor();
    let engine = RaidEngine::new(&catalog);

    tracing::info!(
        "{}: {} sign-ups, composition {}/{}/{}",
        scenario.title(),
        roster.len(),
        target.tanks,
        target.healers,
        target.dps
    );

    match config.command {
        Command::Render { chunk } => {
            let lines = engine.render(roster.members(), &target, requires_mentor);
            let helpers = engine.render_helpers(roster.members());
            match config.format {
                OutputFormat::Json => {
                    let output = json!({
                        "title": scenario.title(),
                        "raiders": lines,
                        "helpers": helpers,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    let blocks = match chunk {
                        Some(max_len) => chunk_lines(lines.as_slice(), max_len),
                        None => vec![lines.join("\n")],
                    };
                    println!("{}", scenario.title());
                    println!("{}", blocks.join("\n\n"));
                    if !helpers.is_empty() {
                        println!("\nHelpers available");
                        println!("{}", helpers.join("\n"));
                    }
                }
            }
        }
        Command::Check => {
            let candidate = scenario
                .candidate
                .as_ref()
                .context("scenario has no [candidate] section")?;
            let ignore: MemberId = scenario.ignore.unwrap_or(candidate.id);
            let admissible =
                engine.can_add(roster.members(), candidate, &target, ignore, requires_mentor);
            tracing::info!("Candidate {} admissible: {}", candidate.name, admissible);
            match config.format {
                OutputFormat::Json => {
                    let output = json!({
                        "candidate": candidate.name,
                        "admissible": admissible,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => println!("admissible: {}", admissible),
            }
        }
        Command::Feasibility => {
            let result = engine.compute(roster.members(), &target);
            let members: Vec<_> = roster
                .members()
                .iter()
                .enumerate()
                .map(|(i, member)| {
                    let ids: Vec<&str> = result
                        .acceptable_jobs(i)
                        .into_iter()
                        .flatten()
                        .map(|&j| catalog.job(j).id.as_str())
                        .collect();
                    (member.name.as_str(), member.helper, ids)
                })
                .collect();
            match config.format {
                OutputFormat::Json => {
                    let output = json!({
                        "feasible": result.feasible,
                        "open_slots": result.open_slots,
                        "members": members
                            .iter()
                            .map(|(name, helper, jobs)| json!({
                                "name": name,
                                "helper": helper,
                                "acceptable": jobs,
                            }))
                            .collect::<Vec<_>>(),
                    });
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&output).context("serializing feasibility")?
                    );
                }
                OutputFormat::Text => {
                    println!("feasible: {}", result.feasible);
                    println!(
                        "open slots: tank {} / healer {} / dps {}",
                        result.open_slots.tank, result.open_slots.healer, result.open_slots.dps
                    );
                    for (name, helper, jobs) in &members {
                        if *helper {
                            println!("  {} (helper)", name);
                        } else {
                            println!("  {}: {}", name, jobs.join(", "));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
