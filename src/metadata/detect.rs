use super::types::{AttributeValue, ModuleMetadata};
use crate::policy::FrameworkVersion;
use tracing::debug;

const LEGACY_MONIKER: &str = ".NETFramework";
const MODERN_MONIKER: &str = ".NETCoreApp";
const LEGACY_ASSEMBLY: &str = "System.Web";
const MODERN_ASSEMBLY_PREFIX: &str = "Microsoft.AspNetCore";

/// Decide which runtime generation a module targets.
///
/// The target framework moniker is authoritative when present, either as the
/// `target_framework` field of the dump or as a `TargetFramework` module
/// attribute. Otherwise the referenced web framework assembly decides.
pub fn detect_framework_version(module: &ModuleMetadata) -> FrameworkVersion {
    let moniker = module.target_framework.as_deref().or_else(|| {
        module
            .attributes
            .iter()
            .find(|a| a.short_name() == "TargetFramework")
            .and_then(|a| a.argument("FrameworkName", Some(0)))
            .and_then(AttributeValue::as_str)
    });

    if let Some(moniker) = moniker {
        if let Some(version) = version_from_moniker(moniker) {
            debug!(module = %module.name, moniker, version = %version, "Framework detected from target moniker");
            return version;
        }
    }

    // A System.Web reference wins over any ASP.NET Core reference.
    if module.assembly_refs.iter().any(|r| r == LEGACY_ASSEMBLY) {
        debug!(module = %module.name, "Framework detected from legacy reference");
        return FrameworkVersion::Legacy;
    }
    if let Some(reference) = module
        .assembly_refs
        .iter()
        .find(|r| r.starts_with(MODERN_ASSEMBLY_PREFIX))
    {
        debug!(module = %module.name, reference = %reference, "Framework detected from modern reference");
        return FrameworkVersion::Modern;
    }

    debug!(module = %module.name, "Framework version could not be detected");
    FrameworkVersion::Unknown
}

fn version_from_moniker(moniker: &str) -> Option<FrameworkVersion> {
    if moniker.starts_with(LEGACY_MONIKER) {
        Some(FrameworkVersion::Legacy)
    } else if moniker.starts_with(MODERN_MONIKER) {
        Some(FrameworkVersion::Modern)
    } else {
        None
    }
}
