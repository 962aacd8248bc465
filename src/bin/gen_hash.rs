//! Prints an argon2 hash for the `passwordHash` column of the `Admin` sheet.
//!
//! Usage: gen_hash <password>

use wholesale_catalog::auth::hash_password;

fn main() -> anyhow::Result<()> {
    let password = std::env::args().nth(1).ok_or_else(|| anyhow::anyhow!("usage: gen_hash <password>"))?;
    let hash = hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
    println!("{hash}");
    Ok(())
}
