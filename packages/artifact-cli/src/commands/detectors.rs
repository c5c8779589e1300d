use crate::cli::DetectorsArgs;
use crate::exit_codes;
use crate::output;
use artifact_rs::DETECTOR_REGISTRY;

pub fn execute(args: DetectorsArgs) -> i32 {
    if args.json {
        match output::to_json(&DETECTOR_REGISTRY, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else {
        println!("Available artifact detectors:\n");
        println!("  {:<8} {:<34} {:<12}", "Abbrev", "Name", "Scope");
        println!("  {}", "-".repeat(56));
        for d in DETECTOR_REGISTRY {
            let scope = if d.per_channel { "per channel" } else { "recording" };
            println!("  {:<8} {:<34} {:<12}", d.abbreviation, d.name, scope);
        }
        println!();
        println!("Blocks are 4 s long; per-channel flags are OR-combined.");
        println!("Example: eegart run --file rec.txt --sr 256 --detector LFP");
    }

    exit_codes::SUCCESS
}
