use crate::plan::Plan;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Build the directory tree from the plan entries, returning the root node.
///
/// Intermediate directories that the plan only creates implicitly are added on the way.
fn build_tree(plan: &Plan, base: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = base
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| base.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // map relative path to node
    let mut lookup: HashMap<PathBuf, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(PathBuf::new(), Rc::clone(&root));

    for entry in &plan.entries {
        let mut current = PathBuf::new();
        let components: Vec<_> = entry.destination.components().collect();

        for (index, component) in components.iter().enumerate() {
            let parent = current.clone();
            current.push(component);

            if lookup.contains_key(&current) {
                continue;
            }

            let is_leaf_file = entry.is_file() && index == components.len() - 1;
            let child = Rc::new(RefCell::new(TreeNode::new(
                component.as_os_str().to_string_lossy().to_string(),
                is_leaf_file,
            )));

            let Some(parent_node) = lookup.get(&parent) else {
                log::debug!("parent of {} not found", current.display());
                break;
            };

            parent_node.borrow_mut().children.push(Rc::clone(&child));
            lookup.insert(current.clone(), child);
        }
    }

    root
}

fn write_tree(out: &mut String, node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    out.push_str(&format!("{}{}{}\n", prefix.yellow(), connector, name));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        write_tree(out, child, &child_prefix, i == len - 1);
    }
}

/// Renders the plan as an ASCII tree rooted at `base`.
pub fn render_tree(plan: &Plan, base: &Path) -> String {
    let mut out = String::new();

    write_tree(&mut out, &build_tree(plan, base), "", true);

    out
}

pub fn preview_as_tree(plan: &Plan, base: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    println!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    print!("{}", render_tree(plan, base));

    println!(
        "\n{} {}",
        "└─".bold().bright_blue(),
        "Dry run: nothing was written".bright_green()
    );
}
