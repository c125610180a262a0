//! Kubectl wrapper utilities

use crate::config::settings::KubectlSettings;
use crate::utils::errors::ZonesError;
use std::process::Command;

/// Run kubectl and capture stdout.
///
/// Fails if the binary cannot be found, exits non-zero, or prints non-UTF-8.
pub fn run_kubectl_output<S: AsRef<str>>(
    args: &[S],
    kubectl: &KubectlSettings,
) -> Result<String, ZonesError> {
    let program = which::which(&kubectl.program).map_err(|_| ZonesError::KubectlNotFound {
        program: kubectl.program.clone(),
    })?;

    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let mut cmd = Command::new(&program);

    if let Some(kc) = &kubectl.kubeconfig {
        cmd.env("KUBECONFIG", kc);
    }

    cmd.args(&args);

    let joined = args.join(" ");
    tracing::debug!("Running {} {}", program.display(), joined);

    let output = cmd.output().map_err(|source| ZonesError::Spawn {
        program: kubectl.program.clone(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ZonesError::Kubectl {
            args: joined,
            status: output.status,
            stderr: stderr.trim_end().to_string(),
        });
    }

    Ok(String::from_utf8(output.stdout)?)
}

/// Run `kubectl get <resource> <extra_args> -o json` and return the raw document
pub fn get_json<S: AsRef<str>>(
    resource: &str,
    extra_args: &[S],
    kubectl: &KubectlSettings,
) -> Result<String, ZonesError> {
    let mut args = vec!["get", resource];
    args.extend(extra_args.iter().map(AsRef::as_ref));
    args.extend(["-o", "json"]);

    run_kubectl_output(args.as_slice(), kubectl)
}
