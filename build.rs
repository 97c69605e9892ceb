//! Build script to track include_str! dependencies.
//! This ensures cargo rebuilds when the embedded data files change.

fn main() {
    println!("cargo:rerun-if-changed=data/tickets.json");
    println!("cargo:rerun-if-changed=data/breath.json");
}
