//! Track-a-file command

use anyhow::Result;
use std::path::Path;
use stopmo_core::TrackedPath;
use stopmo_journal::STOPMO_DIR;

use crate::util;

pub fn run(file: Option<&str>) -> Result<()> {
    let repo = util::open_or_init()?;

    let Some(file) = file else {
        let tracked = repo.index().tracked()?;
        if tracked.is_empty() {
            println!("Add a file to the index.");
        } else {
            println!("Tracked files:");
            for path in tracked {
                println!("{path}");
            }
        }
        return Ok(());
    };

    // Reject paths that cannot name a file inside the worktree, then check
    // the file actually exists before tracking it.
    let path = match TrackedPath::new(file) {
        Ok(path) => path,
        Err(_) => {
            println!("Can't find '{file}'.");
            return Ok(());
        }
    };
    // The metadata directory is invisible to tracking
    if Path::new(path.as_str()).starts_with(STOPMO_DIR) {
        println!("Can't find '{file}'.");
        return Ok(());
    }
    if !path.in_root(repo.root()).is_file() {
        println!("Can't find '{file}'.");
        return Ok(());
    }

    repo.index().track(&path)?;
    println!("The file '{file}' is tracked.");
    Ok(())
}
