use crate::utils::error::{InventoryError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// AWS 區域格式：小寫字母、數字與連字號，例如 `us-gov-west-1`
pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    let well_formed = region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !region.starts_with('-')
        && !region.ends_with('-')
        && region.contains('-');

    if !well_formed {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_regions(field_name: &str, regions: &[String]) -> Result<()> {
    if regions.is_empty() {
        return Err(InventoryError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one region is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for region in regions {
        validate_aws_region(field_name, region)?;
        if !seen.insert(region.as_str()) {
            return Err(InventoryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: region.clone(),
                reason: "Region listed more than once".to_string(),
            });
        }
    }

    Ok(())
}

/// IAM 角色名稱：1-64 字元，允許 `+=,.@_-`
pub fn validate_role_name(field_name: &str, role_name: &str) -> Result<()> {
    validate_non_empty_string(field_name, role_name)?;

    if role_name.len() > 64 {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: role_name.to_string(),
            reason: "IAM role name must be at most 64 characters".to_string(),
        });
    }

    if !role_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "+=,.@_-".contains(c))
    {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: role_name.to_string(),
            reason: "IAM role name contains invalid characters".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_prefix(field_name: &str, prefix: &str) -> Result<()> {
    validate_non_empty_string(field_name, prefix)?;

    if prefix.contains(['/', '\\', '\0']) {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "File prefix cannot contain path separators".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_aws_region() {
        assert!(validate_aws_region("regions", "us-gov-west-1").is_ok());
        assert!(validate_aws_region("regions", "us-east-1").is_ok());
        assert!(validate_aws_region("regions", "").is_err());
        assert!(validate_aws_region("regions", "US-GOV-WEST-1").is_err());
        assert!(validate_aws_region("regions", "-us-gov").is_err());
        assert!(validate_aws_region("regions", "global").is_err());
    }

    #[test]
    fn test_validate_regions() {
        let regions = vec!["us-gov-west-1".to_string(), "us-gov-east-1".to_string()];
        assert!(validate_regions("regions", &regions).is_ok());
        assert!(validate_regions("regions", &[]).is_err());

        let duplicated = vec!["us-gov-west-1".to_string(), "us-gov-west-1".to_string()];
        assert!(validate_regions("regions", &duplicated).is_err());
    }

    #[test]
    fn test_validate_role_name() {
        assert!(validate_role_name("role_name", "OrganizationAccountAccessRole").is_ok());
        assert!(validate_role_name("role_name", "ops+audit@team").is_ok());
        assert!(validate_role_name("role_name", "  ").is_err());
        assert!(validate_role_name("role_name", "role/with/slash").is_err());
        assert!(validate_role_name("role_name", &"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_file_prefix() {
        assert!(validate_file_prefix("output.prefix", "govcloud_fsx_inventory").is_ok());
        assert!(validate_file_prefix("output.prefix", "../escape").is_err());
        assert!(validate_file_prefix("output.prefix", "").is_err());
    }
}
