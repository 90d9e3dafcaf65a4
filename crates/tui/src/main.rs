use anyhow::Result;

fn main() -> Result<()> {
    promptshare_tui::run()
}
