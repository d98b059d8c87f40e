//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Tree Tensor Network classifier circuits",
        style("treenet").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  treenet-ir    Circuit intermediate representation");
    println!("  treenet-core  TTN construction and angle embedding");
    println!("  treenet-qasm  OpenQASM 3 / 2 emission");
    println!("  treenet-cli   Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
