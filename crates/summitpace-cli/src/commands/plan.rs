use clap::Args;
use summitpace_core::{format_clock, generate_schedule, FatigueAdjustment, Route, TripSummary};

use super::{print_schedule, PlanOverrides};

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub overrides: PlanOverrides,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = args.overrides.resolve()?;
    let route = Route::middle_teton();
    let schedule = generate_schedule(&route, &resolved.plan, &FatigueAdjustment::none(), None)?;
    let summary =
        TripSummary::from_schedule(&resolved.plan, &schedule, None, resolved.late_return_hour);

    if args.json {
        let out = serde_json::json!({
            "plan": resolved.plan,
            "summary": summary,
            "schedule": schedule,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_schedule(&schedule, |_| false);
    if let Some(summary) = summary {
        println!();
        print_summary(&summary);
    }
    Ok(())
}

pub fn print_summary(summary: &TripSummary) {
    println!("Start:   {}", format_clock(summary.start_time));
    if let Some(mile) = summary.resumed_from_mile {
        println!("From:    mile {mile}");
    }
    println!(
        "Summit:  {}",
        summary.summit_eta.as_deref().unwrap_or("reached")
    );
    println!("Return:  {}", format_clock(summary.return_time));
    println!("Total:   {}", summary.total_display());
    if summary.late_return {
        println!("warning: late return, consider an earlier start");
    }
}
