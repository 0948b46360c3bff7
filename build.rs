fn main() {
    // Release builds pass VERSION (e.g. a git tag). Local builds use the crate version.
    let version = std::env::var("VERSION").unwrap_or_else(|_| {
        format!("v{}", std::env::var("CARGO_PKG_VERSION").unwrap_or_default())
    });
    println!("cargo:rerun-if-env-changed=VERSION");
    println!("cargo:rustc-env=VERSION={}", version);
}
