use std::{fs, path::Path, process};

use inquire::Confirm;
use log::error;

use crate::args::Args;

/// Makes sure the asset root exists before the server starts.
/// A missing root is scaffolded interactively with a placeholder index
/// document, so a fresh checkout has something to serve. Declining the
/// prompt exits the process.
pub fn check_asset_root(args: &Args) {
    let root = Path::new(&args.root);

    if !root.is_dir() {
        prompt_to_create_dir(
            &args.root,
            &format!("Asset directory \"{}\" not found. Would you like to create it?", &args.root),
            "The server can only serve files from inside this directory.",
        );

        let index_path = root.join(&args.index);
        prompt_to_create_file(
            &index_path,
            include_bytes!("../../default_site/index.html"),
            &format!("Generate a placeholder \"{}\"?", index_path.display()),
            "This is the document served when the request path is \"/\".",
        );
    }
}

fn prompt_to_create_dir(dir: &str, text: &str, subtext: &str) {
    let answer = Confirm::new(text)
        .with_default(true)
        .with_help_message(subtext)
        .prompt();

    match answer {
        Ok(true) => {
            match fs::create_dir_all(dir) {
                Err(err) => {
                    error!("{}", err);
                }
                _ => {
                    return;
                }
            }
        }
        _ => {}
    }
    process::exit(1)
}

fn prompt_to_create_file(file: &Path, content: &[u8], text: &str, subtext: &str) {
    let answer = Confirm::new(text)
        .with_default(true)
        .with_help_message(subtext)
        .prompt();

    match answer {
        Ok(true) => {
            match fs::write(file, content) {
                Err(err) => {
                    error!("{}", err);
                }
                _ => {
                    return;
                }
            }
        }
        _ => {}
    }
    process::exit(1)
}
