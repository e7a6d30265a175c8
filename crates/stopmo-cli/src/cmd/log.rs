//! Commit history command

use anyhow::Result;

use crate::util;

pub fn run() -> Result<()> {
    let repo = util::open_or_init()?;

    let text = repo.log().text()?;
    if text.is_empty() {
        println!("No commits yet.");
        return Ok(());
    }

    // The stored file is already the display format
    print!("{text}");
    Ok(())
}
