use anyhow::Result;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use govcloud_fsx_inventory::domain::ports::CloudProvider;
use govcloud_fsx_inventory::AwsProvider;
use httpmock::prelude::*;

const FSX_TARGET: &str = "AWSSimbaAPIService_v20180301.DescribeFileSystems";
const ORGANIZATIONS_TARGET: &str = "AWSOrganizationsV20161128.ListAccounts";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

fn session_for(server: &MockServer) -> SdkConfig {
    SdkConfig::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-gov-west-1"))
        .credentials_provider(SharedCredentialsProvider::new(Credentials::new(
            "AKIDTEST", "secret", None, None, "test",
        )))
        .retry_config(RetryConfig::disabled())
        .endpoint_url(server.base_url())
        .build()
}

#[tokio::test]
async fn test_describe_file_systems_follows_next_token() -> Result<()> {
    let server = MockServer::start();

    let first_page = server.mock(|when, then| {
        when.method(POST)
            .header("x-amz-target", FSX_TARGET)
            .json_body(serde_json::json!({}));
        then.status(200)
            .header("Content-Type", AMZ_JSON)
            .json_body(serde_json::json!({
                "FileSystems": [{
                    "FileSystemId": "fs-0123456789abcdef0",
                    "FileSystemType": "LUSTRE",
                    "Lifecycle": "AVAILABLE",
                    "CreationTime": 1705276800
                }],
                "NextToken": "page-2"
            }));
    });
    let second_page = server.mock(|when, then| {
        when.method(POST)
            .header("x-amz-target", FSX_TARGET)
            .json_body(serde_json::json!({"NextToken": "page-2"}));
        then.status(200)
            .header("Content-Type", AMZ_JSON)
            .json_body(serde_json::json!({
                "FileSystems": [{
                    "FileSystemId": "fs-abcdef0123456789",
                    "FileSystemType": "WINDOWS",
                    "Lifecycle": "CREATING"
                }]
            }));
    });

    let provider = AwsProvider::new("us-gov-west-1");
    let session = session_for(&server);

    let page = provider
        .describe_file_systems_page(&session, "us-gov-east-1", None)
        .await?;
    assert_eq!(page.next_token.as_deref(), Some("page-2"));
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].filesystem_id, "fs-0123456789abcdef0");
    assert_eq!(page.items[0].filesystem_type, "LUSTRE");
    assert_eq!(page.items[0].region, "us-gov-east-1");
    assert_eq!(
        page.items[0].creation_time.map(|t| t.to_rfc3339()).as_deref(),
        Some("2024-01-15T00:00:00+00:00")
    );

    let page = provider
        .describe_file_systems_page(&session, "us-gov-east-1", page.next_token)
        .await?;
    assert!(page.next_token.is_none());
    assert_eq!(page.items[0].lifecycle_state, "CREATING");
    assert!(page.items[0].creation_time.is_none());

    first_page.assert();
    second_page.assert();
    Ok(())
}

#[tokio::test]
async fn test_describe_file_systems_access_denied_is_classified() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).header("x-amz-target", FSX_TARGET);
        then.status(400)
            .header("Content-Type", AMZ_JSON)
            .json_body(serde_json::json!({
                "__type": "AccessDenied",
                "Message": "User is not authorized to perform fsx:DescribeFileSystems"
            }));
    });

    let provider = AwsProvider::new("us-gov-west-1");
    let err = provider
        .describe_file_systems_page(&session_for(&server), "us-gov-west-1", None)
        .await
        .unwrap_err();

    mock.assert_hits(1);
    assert!(err.is_access_denied());
    assert_eq!(err.code(), Some("AccessDenied"));
    Ok(())
}

#[tokio::test]
async fn test_list_accounts_maps_fields() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).header("x-amz-target", ORGANIZATIONS_TARGET);
        then.status(200)
            .header("Content-Type", AMZ_JSON)
            .json_body(serde_json::json!({
                "Accounts": [
                    {
                        "Id": "987654321098",
                        "Arn": "arn:aws:organizations::111111111111:account/o-abc/987654321098",
                        "Name": "Production-GovCloud",
                        "Email": "govcloud-prod@example.com",
                        "Status": "ACTIVE"
                    },
                    {
                        "Id": "876543210987",
                        "Status": "SUSPENDED"
                    }
                ]
            }));
    });

    let provider = AwsProvider::new("us-gov-west-1");
    let page = provider
        .list_accounts_page(&session_for(&server), None)
        .await?;

    mock.assert();
    assert!(page.next_token.is_none());
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Production-GovCloud");
    assert_eq!(page.items[0].status, "ACTIVE");
    assert_eq!(page.items[1].name, "");
    assert_eq!(page.items[1].email, "");
    assert_eq!(page.items[1].status, "SUSPENDED");
    Ok(())
}

#[tokio::test]
async fn test_list_accounts_access_denied() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).header("x-amz-target", ORGANIZATIONS_TARGET);
        then.status(400)
            .header("Content-Type", AMZ_JSON)
            .json_body(serde_json::json!({
                "__type": "AccessDeniedException",
                "Message": "You don't have permissions to access this resource."
            }));
    });

    let provider = AwsProvider::new("us-gov-west-1");
    let err = provider
        .list_accounts_page(&session_for(&server), None)
        .await
        .unwrap_err();

    assert!(err.is_access_denied());
    assert!(err
        .recovery_suggestion()
        .contains("organizations:ListAccounts"));
    Ok(())
}

#[tokio::test]
async fn test_assume_role_returns_scoped_session() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .body_contains("Action=AssumeRole")
            .body_contains("RoleSessionName=fsx-inventory-987654321098");
        then.status(200)
            .header("Content-Type", "text/xml")
            .body(
                r#"<AssumeRoleResponse xmlns="https://sts.amazonaws.com/doc/2011-06-15/">
  <AssumeRoleResult>
    <Credentials>
      <AccessKeyId>ASIAASSUMED</AccessKeyId>
      <SecretAccessKey>assumed-secret</SecretAccessKey>
      <SessionToken>assumed-token</SessionToken>
      <Expiration>2030-01-01T00:00:00Z</Expiration>
    </Credentials>
    <AssumedRoleUser>
      <AssumedRoleId>AROAEXAMPLE:fsx-inventory-987654321098</AssumedRoleId>
      <Arn>arn:aws-us-gov:sts::987654321098:assumed-role/OrganizationAccountAccessRole/fsx-inventory-987654321098</Arn>
    </AssumedRoleUser>
  </AssumeRoleResult>
  <ResponseMetadata>
    <RequestId>c6104cbe-af31-11e0-8154-cbc7ccf896c7</RequestId>
  </ResponseMetadata>
</AssumeRoleResponse>"#,
            );
    });

    let provider = AwsProvider::new("us-gov-west-1");
    let assumed = provider
        .assume_role(
            &session_for(&server),
            "arn:aws-us-gov:iam::987654321098:role/OrganizationAccountAccessRole",
            "fsx-inventory-987654321098",
        )
        .await?;

    mock.assert();
    let credentials = assumed
        .credentials_provider()
        .expect("assumed session has credentials")
        .provide_credentials()
        .await?;
    assert_eq!(credentials.access_key_id(), "ASIAASSUMED");
    assert_eq!(credentials.session_token(), Some("assumed-token"));
    assert_eq!(assumed.region().map(|r| r.as_ref()), Some("us-gov-west-1"));
    Ok(())
}
