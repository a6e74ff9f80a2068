use crate::core::{
    command_init::{ViewCommandInit, ViewOptions},
    error::Result,
    print_section_header,
    render::render_changes,
    store::Operation,
};

pub fn execute_working(options: &ViewOptions) -> Result<()> {
    let mut context = ViewCommandInit::initialize(options)?;
    context.browser_snapshot(Some(Operation::WorkingChanges))?;

    print_section_header("Working changes");
    print!("{}", render_changes(&context.visible_changes(), true));
    println!();

    Ok(())
}
