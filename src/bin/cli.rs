use chrono::NaiveDate;
use solar_timeline::{
    InjectionMode, InvestmentModel, Phase, Portfolio, ProjectConfig, ProjectTimeline, Typology,
    compute_timeline, export_timelines_to_csv, load_portfolio_from_json, save_portfolio_to_json,
};
use std::io::{self, Write};

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::new();
        line.push('|');
        for (ci, cell) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.len());
            if pad > 0 {
                line.push_str(&" ".repeat(pad));
            }
            line.push(' ');
            line.push('|');
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&header_cells));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                                    Show this help\n  list                                    List projects\n  show <id>                               Show one project's configuration\n  add <id> <name> <power_kwc> <YYYY-MM-DD>\n                                          Add or replace a project (date = signature)\n  delete <id>                             Remove a project\n  typology <id> <key>                     new_roof|existing_roof|shaded_structure|ground_mounted\n  injection <id> <key>                    total_injection|self_consumption\n  investment <id> <key>                   own_investment|third_party_investment\n  subcontracted <id> <true|false>         Toggle subcontracting\n  skip <id> <phase>                       Exclude a phase from the plan\n  unskip <id> <phase>                     Re-include a phase\n  override <id> <phase> <months>          Override a phase duration\n  clearoverride <id> <phase>              Remove a duration override\n  plan <id>                               Compute and print the project's timeline\n  table                                   Compute all timelines, one summary row each\n  save <path>                             Persist portfolio to a JSON file\n  load <path>                             Load portfolio from a JSON file\n  export <path>                           Export computed timelines to CSV\n  quit|exit                               Exit\nPhases: negotiation urbanism tender lease_management connection construction"
    );
}

fn print_project(config: &ProjectConfig) {
    println!("Project id        : {}", config.id);
    println!("Name              : {}", config.name);
    println!("Signature date    : {}", config.signature_date);
    println!("Power (kWc)       : {}", config.power_kwc);
    println!("Typology          : {}", config.typology.key());
    println!("Injection         : {}", config.injection.key());
    println!("Investment        : {}", config.investment.key());
    println!("Subcontracted     : {}", config.subcontracted);
    let skipped: Vec<&str> = config.skipped_phases.iter().map(|p| p.key()).collect();
    println!("Skipped phases    : {}", skipped.join(", "));
    let overrides: Vec<String> = config
        .duration_overrides
        .iter()
        .map(|(phase, months)| format!("{}={}", phase.key(), months))
        .collect();
    println!("Duration overrides: {}", overrides.join(", "));
}

fn format_range(range: &solar_timeline::DateRange) -> Vec<String> {
    vec![
        range.start.to_string(),
        range.end.to_string(),
        format!("{}", range.duration_months),
    ]
}

fn print_timeline(timeline: &ProjectTimeline) {
    let result = &timeline.result;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut push = |phase: &str, cells: Vec<String>| {
        let mut row = vec![phase.to_string()];
        row.extend(cells);
        rows.push(row);
    };
    if let Some(range) = &result.negotiation {
        push("negotiation", format_range(range));
    }
    if let Some(range) = &result.urbanism {
        push("urbanism", format_range(range));
    }
    if let Some(range) = &result.tender {
        push("tender", format_range(range));
    }
    if let Some(range) = &result.lease {
        push("lease_management", format_range(range));
    }
    push("connection", format_range(&result.connection));
    push("construction", format_range(&result.construction));
    push("operation", format_range(&result.operation));
    println!(
        "{}",
        render_text_table(&["phase", "start", "end", "months"], &rows)
    );

    let milestones = &result.milestones;
    let format_opt =
        |date: Option<NaiveDate>| date.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
    println!("Letter of intent     : {}", format_opt(milestones.letter_of_intent));
    println!("Signature            : {}", milestones.signature);
    println!("Permit cleared       : {}", format_opt(milestones.permit_cleared));
    println!("Tender result        : {}", format_opt(milestones.tender_result));
    println!("Lease signed         : {}", format_opt(milestones.lease_signed));
    println!("Construction complete: {}", format_opt(milestones.construction_complete));
    println!("Commercial operation : {}", format_opt(milestones.commercial_operation));
    println!("Total months         : {}", result.total_duration_months);
}

fn print_portfolio_table(portfolio: &Portfolio) {
    let timelines = portfolio.compute_all();
    let rows: Vec<Vec<String>> = timelines
        .iter()
        .map(|timeline| {
            let result = &timeline.result;
            vec![
                timeline.project_id.clone(),
                timeline.project_name.clone(),
                result.milestones.signature.to_string(),
                result.construction.start.to_string(),
                result
                    .milestones
                    .commercial_operation
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                format!("{}", result.total_duration_months),
            ]
        })
        .collect();
    println!(
        "{}",
        render_text_table(
            &["id", "name", "signature", "construction", "cod", "months"],
            &rows
        )
    );
}

fn parse_phase(key: &str) -> Option<Phase> {
    Phase::from_key(key)
}

fn main() {
    let mut portfolio = Portfolio::new();

    println!("Solar Timeline (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "list" => {
                let rows: Vec<Vec<String>> = portfolio
                    .projects()
                    .iter()
                    .map(|project| {
                        vec![
                            project.id.clone(),
                            project.name.clone(),
                            project.power_kwc.to_string(),
                            project.signature_date.to_string(),
                            project.typology.key().to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    render_text_table(&["id", "name", "kwc", "signature", "typology"], &rows)
                );
            }
            "show" => match parts.next() {
                Some(id) => match portfolio.find_project(id) {
                    Some(config) => print_project(config),
                    None => println!("Project {id} not found."),
                },
                None => println!("Usage: show <id>"),
            },
            "add" => {
                let id_s = parts.next();
                let name_s = parts.next();
                let power_s = parts.next();
                let date_s = parts.next();
                match (id_s, name_s, power_s, date_s) {
                    (Some(id), Some(name), Some(power_s), Some(date_s)) => {
                        let power: f64 = match power_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid power_kwc");
                                continue;
                            }
                        };
                        let date = match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                            Ok(d) => d,
                            Err(_) => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        portfolio.upsert_project(ProjectConfig::new(id, name, date, power));
                        println!("Project {id} upserted.");
                    }
                    _ => println!("Usage: add <id> <name> <power_kwc> <YYYY-MM-DD>"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    if portfolio.delete_project(id) {
                        println!("Deleted project {id}.");
                    } else {
                        println!("Project {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "typology" | "injection" | "investment" | "subcontracted" => {
                let id_s = parts.next();
                let value_s = parts.next();
                match (id_s, value_s) {
                    (Some(id), Some(value)) => {
                        let Some(config) = portfolio.find_project_mut(id) else {
                            println!("Project {id} not found.");
                            continue;
                        };
                        let applied = match cmd {
                            "typology" => match Typology::from_key(value) {
                                Some(typology) => {
                                    config.typology = typology;
                                    true
                                }
                                None => false,
                            },
                            "injection" => match InjectionMode::from_key(value) {
                                Some(injection) => {
                                    config.injection = injection;
                                    true
                                }
                                None => false,
                            },
                            "investment" => match InvestmentModel::from_key(value) {
                                Some(investment) => {
                                    config.investment = investment;
                                    true
                                }
                                None => false,
                            },
                            _ => match value {
                                "true" => {
                                    config.subcontracted = true;
                                    true
                                }
                                "false" => {
                                    config.subcontracted = false;
                                    true
                                }
                                _ => false,
                            },
                        };
                        if applied {
                            println!("{cmd} set for {id}.");
                        } else {
                            println!("Invalid {cmd} value '{value}'.");
                        }
                    }
                    _ => println!("Usage: {cmd} <id> <value>"),
                }
            }
            "skip" | "unskip" => {
                let id_s = parts.next();
                let phase_s = parts.next();
                match (id_s, phase_s) {
                    (Some(id), Some(phase_s)) => {
                        let Some(phase) = parse_phase(phase_s) else {
                            println!("Unknown phase '{phase_s}'.");
                            continue;
                        };
                        match portfolio.find_project_mut(id) {
                            Some(config) => {
                                config.set_skipped(phase, cmd == "skip");
                                println!("{} {} for {}.", cmd, phase.key(), id);
                            }
                            None => println!("Project {id} not found."),
                        }
                    }
                    _ => println!("Usage: {cmd} <id> <phase>"),
                }
            }
            "override" => {
                let id_s = parts.next();
                let phase_s = parts.next();
                let months_s = parts.next();
                match (id_s, phase_s, months_s) {
                    (Some(id), Some(phase_s), Some(months_s)) => {
                        let Some(phase) = parse_phase(phase_s) else {
                            println!("Unknown phase '{phase_s}'.");
                            continue;
                        };
                        let months: f64 = match months_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid months");
                                continue;
                            }
                        };
                        match portfolio.find_project_mut(id) {
                            Some(config) => {
                                config.set_duration_override(phase, months);
                                println!("Override {}={} set for {}.", phase.key(), months, id);
                            }
                            None => println!("Project {id} not found."),
                        }
                    }
                    _ => println!("Usage: override <id> <phase> <months>"),
                }
            }
            "clearoverride" => {
                let id_s = parts.next();
                let phase_s = parts.next();
                match (id_s, phase_s) {
                    (Some(id), Some(phase_s)) => {
                        let Some(phase) = parse_phase(phase_s) else {
                            println!("Unknown phase '{phase_s}'.");
                            continue;
                        };
                        match portfolio.find_project_mut(id) {
                            Some(config) => {
                                config.clear_duration_override(phase);
                                println!("Override cleared for {} on {}.", phase.key(), id);
                            }
                            None => println!("Project {id} not found."),
                        }
                    }
                    _ => println!("Usage: clearoverride <id> <phase>"),
                }
            }
            "plan" => match parts.next() {
                Some(id) => match portfolio.find_project(id) {
                    Some(config) => {
                        let timeline = ProjectTimeline {
                            project_id: config.id.clone(),
                            project_name: config.name.clone(),
                            result: compute_timeline(config),
                        };
                        print_timeline(&timeline);
                    }
                    None => println!("Project {id} not found."),
                },
                None => println!("Usage: plan <id>"),
            },
            "table" => print_portfolio_table(&portfolio),
            "save" => match parts.next() {
                Some(path) => match save_portfolio_to_json(&portfolio, path) {
                    Ok(_) => println!("Portfolio saved to {path}."),
                    Err(e) => println!("Error saving portfolio: {e}"),
                },
                None => println!("Usage: save <path>"),
            },
            "load" => match parts.next() {
                Some(path) => match load_portfolio_from_json(path) {
                    Ok(loaded) => {
                        portfolio = loaded;
                        println!("Portfolio loaded from {path}.");
                    }
                    Err(e) => println!("Error loading portfolio: {e}"),
                },
                None => println!("Usage: load <path>"),
            },
            "export" => match parts.next() {
                Some(path) => {
                    let timelines = portfolio.compute_all();
                    match export_timelines_to_csv(&timelines, path) {
                        Ok(_) => println!("Timelines exported to {path}."),
                        Err(e) => println!("Error exporting timelines: {e}"),
                    }
                }
                None => println!("Usage: export <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
