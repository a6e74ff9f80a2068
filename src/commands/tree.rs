use crate::core::{
    command_init::{ViewCommandInit, ViewOptions},
    error::Result,
    model::FileTreeItem,
    print_section_header,
    render::render_tree,
    store::Operation,
};

pub fn execute_tree(options: &ViewOptions) -> Result<()> {
    let mut context = ViewCommandInit::initialize(options)?;
    let snapshot = context.browser_snapshot(Some(Operation::FileTree))?;

    log::debug!(
        "Rendering tree with {} files",
        snapshot.file_tree.iter().map(FileTreeItem::file_count).sum::<usize>()
    );
    print_section_header("Files");
    print!("{}", render_tree(&snapshot.file_tree));
    println!();

    Ok(())
}
