use crate::core::{
    command_init::{ViewCommandInit, ViewOptions},
    error::Result,
    render::render_file,
    store::Operation,
};

pub fn execute_cat(options: &ViewOptions, path: &str) -> Result<()> {
    let mut context = ViewCommandInit::initialize(options)?;
    context.select_file(path);
    let snapshot = context.browser_snapshot(Some(Operation::FileContent))?;

    if let (Some(selected), Some(content)) = (&snapshot.selected_file, &snapshot.file_content) {
        print!("\n{}", render_file(selected, content));
        println!();
    }

    Ok(())
}
