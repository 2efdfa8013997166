use crate::errors::AppResult;
use crate::export::capabilities;
use crate::utils::colors::{GREEN, GREY, RESET};

/// List every export format and whether this build can write it.
pub fn handle() -> AppResult<()> {
    println!("Export formats:");
    for (name, enabled) in capabilities() {
        if enabled {
            println!("  {GREEN}{name:<5}{RESET} enabled");
        } else {
            println!("  {GREY}{name:<5} disabled (built without the `{name}` feature){RESET}");
        }
    }
    Ok(())
}
