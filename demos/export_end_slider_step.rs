use anyhow::Result;
use cytostage_catalog::belt_gt2;
use cytostage_io::export_step;
use cytostage_parts::{Side, end_slider};

fn main() -> Result<()> {
    let slider = end_slider(8.0, 8.0, 60.0, Side::Left, Some(belt_gt2()), "end_slider")?;
    for child in slider.children() {
        export_step(child.geometry(), format!("out/{}.step", child.name))?;
    }
    Ok(())
}
