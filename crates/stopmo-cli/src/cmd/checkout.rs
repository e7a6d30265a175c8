//! Worktree restore command

use anyhow::Result;
use stopmo_journal::CommitId;

use crate::util;

pub fn run(commit: Option<&str>) -> Result<()> {
    let Some(commit) = commit else {
        println!("Commit id was not passed.");
        return Ok(());
    };

    let repo = util::open_or_init()?;

    // Unparseable ids are reported the same way as unknown ones.
    let id = match CommitId::from_hex(commit) {
        Ok(id) => id,
        Err(_) => {
            println!("Commit does not exist.");
            return Ok(());
        }
    };
    if !repo.has_commit(&id) {
        println!("Commit does not exist.");
        return Ok(());
    }

    repo.checkout(&id)?;
    println!("Switched to commit {commit}.");
    Ok(())
}
