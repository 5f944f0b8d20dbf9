//! Example: Credentials, nonces and signing.
//!
//! Run with: cargo run --example auth_credentials

use yobit_api_client::auth::{
    Credentials, CredentialsProvider, EnvCredentials, NonceMode, NonceProvider, StaticCredentials,
    StoredNonce, record_name, sign_request,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let static_creds = StaticCredentials::new("A1B2C3D4E5F6", "secret");
    println!("Static key: {}", static_creds.get_credentials().api_key);

    if let Some(env_creds) = EnvCredentials::try_from_env() {
        println!("Loaded env credentials: {:?}", env_creds.get_credentials());
    } else {
        println!("Set YOBIT_API_KEY and YOBIT_API_SECRET to load env credentials.");
    }

    // In-memory nonces start at 1 and are lost on exit.
    let ephemeral = StoredNonce::ephemeral();
    let first = ephemeral.next_nonce("A1B2C3D4E5F6")?;
    let second = ephemeral.next_nonce("A1B2C3D4E5F6")?;
    println!("Ephemeral nonces: {} {}", first, second);

    // Persistent nonces live in one record per key.
    let dir = std::env::temp_dir();
    let provider = NonceMode::Persistent { dir: dir.clone() }.into_provider();
    let nonce = provider.next_nonce("A1B2C3D4E5F6")?;
    let record = dir.join(record_name("A1B2C3D4E5F6"));
    println!("Persistent nonce {} in {}", nonce, record.display());

    let creds = Credentials::new("A1B2C3D4E5F6", "secret");
    let body = format!("method=getInfo&nonce={nonce}");
    println!("Sign: {}", sign_request(&creds, &body));

    Ok(())
}
