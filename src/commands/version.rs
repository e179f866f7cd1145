use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("ys-monitor version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
