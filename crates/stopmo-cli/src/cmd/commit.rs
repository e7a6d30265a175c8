//! Snapshot commit command

use anyhow::Result;
use stopmo_journal::CommitOutcome;

use crate::util;

pub fn run(message: Option<&str>) -> Result<()> {
    let Some(message) = message.filter(|m| !m.is_empty()) else {
        println!("Message was not passed.");
        return Ok(());
    };

    let repo = util::open_or_init()?;
    match repo.commit(message)? {
        CommitOutcome::Committed(_) => println!("Changes are committed."),
        CommitOutcome::NothingToCommit => println!("Nothing to commit."),
    }
    Ok(())
}
