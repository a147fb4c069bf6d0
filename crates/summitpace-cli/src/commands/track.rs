use clap::Args;
use summitpace_core::{
    format_clock, percent_change, update_predictions, Checkpoint, CheckpointReport, FatigueLevel,
    PredictionUpdate, Route, Terrain, TripSummary,
};

use super::plan::print_summary;
use super::{parse_checkpoint, print_schedule, PlanOverrides, Resolved};

#[derive(Args)]
pub struct TrackArgs {
    #[command(flatten)]
    pub overrides: PlanOverrides,
    /// Reported progress as MILE@HH:MM, repeatable; either side may be blank
    #[arg(short, long = "checkpoint", value_name = "MILE@HH:MM", value_parser = parse_checkpoint)]
    pub checkpoints: Vec<CheckpointReport>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn predict(
    route: &Route,
    args: &TrackArgs,
) -> Result<(Resolved, PredictionUpdate), Box<dyn std::error::Error>> {
    let resolved = args.overrides.resolve()?;
    let update = update_predictions(route, &resolved.plan, &args.checkpoints)?;
    Ok((resolved, update))
}

pub fn run_update(args: TrackArgs) -> Result<(), Box<dyn std::error::Error>> {
    let route = Route::middle_teton();
    let (resolved, update) = predict(&route, &args)?;
    let summary = TripSummary::from_schedule(
        &resolved.plan,
        &update.schedule,
        Some(update.resumed_from.mile),
        resolved.late_return_hour,
    );
    let resumed_elevation = route.elevation_at(update.resumed_from.mile);

    if args.json {
        let out = serde_json::json!({
            "resumed_from": update.resumed_from,
            "resumed_elevation": resumed_elevation,
            "adjustment": update.adjustment,
            "summary": summary,
            "schedule": update.schedule,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let reported: Vec<Checkpoint> = args
        .checkpoints
        .iter()
        .filter_map(CheckpointReport::complete)
        .collect();

    println!(
        "Resuming from mile {} at {} ({resumed_elevation:.0}ft)",
        update.resumed_from.mile,
        format_clock(update.resumed_from.actual_time)
    );
    if let Some(overall) = update.adjustment.overall_fatigue {
        println!(
            "Overall fatigue {overall:.2} ({:+}%): {}",
            percent_change(overall),
            FatigueLevel::from_factor(overall).describe()
        );
    }
    println!();
    print_schedule(&update.schedule, |event| event.is_near_checkpoint(&reported));
    if let Some(summary) = summary {
        println!();
        print_summary(&summary);
    }
    Ok(())
}

pub fn run_fatigue(args: TrackArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, update) = predict(&Route::middle_teton(), &args)?;

    if args.json {
        let out = serde_json::json!({
            "analyses": update.analyses,
            "adjustment": update.adjustment,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{:>5}  {:>6}  {:>7}  {:>8}  {:>6}  {:<9}",
        "MILE", "TIME", "ACTUAL", "EXPECTED", "RATIO", "TERRAIN"
    );
    for analysis in &update.analyses {
        let ratio = analysis
            .performance_ratio
            .map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
        println!(
            "{:>5.1}  {:>6}  {:>7}  {:>8.0}  {:>6}  {:<9}",
            analysis.mile,
            format_clock(analysis.actual_time),
            analysis.elapsed_minutes,
            analysis.expected_minutes,
            ratio,
            analysis.terrain,
        );
    }

    println!();
    if let Some(overall) = update.adjustment.overall_fatigue {
        println!("{:<9} {overall:.2}", "overall");
    }
    for terrain in Terrain::ALL {
        if let Some(factor) = update.adjustment.factor(terrain) {
            println!(
                "{:<9} {factor:.2}  {:+}%  {}",
                terrain,
                percent_change(factor),
                FatigueLevel::from_factor(factor).describe()
            );
        }
    }
    Ok(())
}
