use super::error::{ErrorAzCli, ResultAzCli};
use log::debug;
use serde::de::DeserializeOwned;
use std::io;
use std::process::{Command, Output};

fn run(args: &[&str]) -> ResultAzCli<Output> {
    debug!("az {}", args.join(" "));

    match Command::new("az").args(args).output() {
        Ok(output) => Ok(output),
        Err(err) => match err.kind() {
            io::ErrorKind::NotFound => Err(ErrorAzCli::AzNotInstalled),
            _ => Err(ErrorAzCli::Io(err)),
        },
    }
}

pub fn signed_in() -> ResultAzCli<bool> {
    let output = run(&["account", "show", "-o", "json"])?;
    Ok(output.status.success())
}

/// Runs an az command and decodes its JSON output.
pub fn az<T: DeserializeOwned>(args: &[&str]) -> ResultAzCli<T> {
    if !signed_in()? {
        return Err(ErrorAzCli::NotLoggedIn);
    }

    let output = run(args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ErrorAzCli::CommandFailure {
            code: output.status.code(),
            stderr,
        });
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}
