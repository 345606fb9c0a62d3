use colored::Colorize;

pub fn print_help() {
    println!("{:━^60}", " Commands ".yellow());
    println!(
        "  {}                 Generate images for every prompt.",
        "gen".bold().green()
    );
    println!(
        "  {} / {} {}        Add a prompt, or remove prompt N.",
        "add".bold().cyan(),
        "rm".bold().cyan(),
        "N".cyan()
    );
    println!(
        "  {} {}        Replace prompt N.",
        "set".bold().cyan(),
        "N <text>".cyan()
    );
    println!(
        "  {} {}      Toggle border, transparent, cute or vector.",
        "toggle".bold().cyan(),
        "<opt>".cyan()
    );
    println!(
        "  {} {}         Set the aspect ratio (1:1, 16:9, 9:16, 4:3, 3:4).",
        "ratio".bold().cyan(),
        "<r>".cyan()
    );
    println!(
        "  {} {}      Select the base image.",
        "image".bold().magenta(),
        "<path>".magenta()
    );
    println!(
        "  {}           Remove the base image and its references.",
        "unimage".bold().magenta()
    );
    println!(
        "  {} {} / {} {}  Add a reference image, or remove reference N.",
        "ref".bold().magenta(),
        "<path>".magenta(),
        "unref".bold().magenta(),
        "N".magenta()
    );
    println!(
        "  {} / {} / {} {}  Fullscreen, download or reuse result N.",
        "view".bold().red(),
        "save".bold().red(),
        "use".bold().red(),
        "N".red()
    );
    println!(
        "  {} / {}         Leave the fullscreen view.",
        "close".bold().red(),
        "esc".bold().red()
    );
    println!(
        "  {} / {} / {}  Redraw, this help, exit.",
        "show".bold().blue(),
        "help".bold().blue(),
        "quit".bold().blue()
    );
    println!("{:━^60}", "".yellow());
}
