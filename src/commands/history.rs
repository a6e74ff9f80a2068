use crate::core::{
    command_init::{ViewCommandInit, ViewOptions},
    error::Result,
    print_section_header,
    render::render_commits,
};

pub fn execute_log(options: &ViewOptions) -> Result<()> {
    let mut context = ViewCommandInit::initialize(options)?;
    let snapshot = context.browser_snapshot(None)?;

    print_section_header("History");
    print!("{}", render_commits(&snapshot.commits, None));
    println!();

    Ok(())
}
