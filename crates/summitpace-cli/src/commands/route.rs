use clap::Args;
use summitpace_core::Route;

#[derive(Args)]
pub struct RouteArgs {
    /// Show the uphill legs between waypoints instead of waypoints
    #[arg(long)]
    pub legs: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RouteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let route = Route::middle_teton();

    if args.legs {
        let legs = route.legs();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&legs)?);
            return Ok(());
        }
        println!(
            "{:>5} {:>5}  {:>5}  {:<9} {:>6}  {:>5}",
            "FROM", "TO", "DIST", "TERRAIN", "GAIN", "GRADE"
        );
        for leg in legs {
            println!(
                "{:>5.1} {:>5.1}  {:>5.1}  {:<9} {:>4}ft  {:>4}%",
                leg.from_mile, leg.to_mile, leg.distance, leg.terrain, leg.gain_ft, leg.grade_percent
            );
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(route.segments())?);
        return Ok(());
    }
    println!("{:>5}  {:<28} {:<9} {:>7}", "MILE", "LOCATION", "TERRAIN", "ELEV");
    for segment in route.segments() {
        println!(
            "{:>5.1}  {:<28} {:<9} {:>5}ft",
            segment.mile, segment.location, segment.terrain, segment.elevation
        );
    }
    Ok(())
}
