// Forward the admin credential from `.env` into the compiled binary.
fn main() {
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=CATALOG_ADMIN_KEY");

    dotenvy::dotenv().ok();

    if let Ok(key) = std::env::var("CATALOG_ADMIN_KEY") {
        println!("cargo:rustc-env=CATALOG_ADMIN_KEY={key}");
    }
}
