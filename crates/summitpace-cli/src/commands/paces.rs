use clap::Args;
use summitpace_core::{
    estimate_fatigue, pace_comparison, CheckpointReport, FatigueAdjustment, Route,
};

use super::{parse_checkpoint, PlanOverrides};

#[derive(Args)]
pub struct PacesArgs {
    #[command(flatten)]
    pub overrides: PlanOverrides,
    /// Reported progress as MILE@HH:MM, repeatable
    #[arg(short, long = "checkpoint", value_name = "MILE@HH:MM", value_parser = parse_checkpoint)]
    pub checkpoints: Vec<CheckpointReport>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PacesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = args.overrides.resolve()?;
    let route = Route::middle_teton();
    let adjustment = if args.checkpoints.is_empty() {
        FatigueAdjustment::none()
    } else {
        estimate_fatigue(&route, &resolved.plan, &args.checkpoints)?
    };
    let rows = pace_comparison(&resolved.plan.paces, &adjustment);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<9} {:>6} {:>6} {:>6} {:>6} {:>7}  {}",
        "TERRAIN", "UP", "UP*", "DOWN", "DOWN*", "CHANGE", "STATUS"
    );
    for row in rows {
        println!(
            "{:<9} {:>6} {:>6} {:>6} {:>6} {:>6}%  {}",
            row.terrain,
            row.original_ascent,
            row.adjusted_ascent,
            row.original_descent,
            row.adjusted_descent,
            format!("{:+}", row.change_percent),
            row.level.describe(),
        );
    }
    Ok(())
}
