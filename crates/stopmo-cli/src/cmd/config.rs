//! Username configuration command

use anyhow::Result;

use crate::util;

pub fn run(name: Option<&str>) -> Result<()> {
    let repo = util::open_or_init()?;

    match name {
        Some(name) => {
            repo.identity().set_username(name)?;
            println!("The username is {name}.");
        }
        None => match repo.identity().username()? {
            Some(name) => println!("The username is {name}."),
            None => println!("Please, tell me who you are."),
        },
    }

    Ok(())
}
