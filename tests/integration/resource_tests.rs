use crate::common;
use assert_json_diff::{assert_json_eq, assert_json_include};
use devportal_client::prelude::*;
use devportal_client::utils::naming::md5_hex;
use mockito::{Matcher, Server};
use serde_json::json;

fn page(number: u32) -> Matcher {
    Matcher::UrlEncoded("pageNumber".to_string(), number.to_string())
}

#[tokio::test]
async fn test_devices_collects_pages_until_empty() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;

    let mut pages = Vec::new();
    for (number, devices) in [
        (1, json!([{"deviceId": "D1"}, {"deviceId": "D2"}])),
        (2, json!([{"deviceId": "D3"}])),
        (3, json!([])),
    ] {
        let mock = server
            .mock("POST", "/account/ios/device/listDevices.action")
            .match_body(Matcher::AllOf(vec![
                page(number),
                Matcher::UrlEncoded("pageSize".to_string(), "500".to_string()),
                Matcher::UrlEncoded("includeRemovedDevices".to_string(), "false".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(common::envelope("devices", devices))
            .expect(1)
            .create_async()
            .await;
        pages.push(mock);
    }

    let client = common::signed_in_client(&server).await;
    let devices = client.devices(Platform::Ios, false).await.unwrap();

    let ids: Vec<&str> = devices
        .iter()
        .filter_map(|d| d["deviceId"].as_str())
        .collect();
    assert_eq!(ids, ["D1", "D2", "D3"]);
    for mock in pages {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_listing_stops_at_total_pages() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    for number in 1..=2 {
        server
            .mock("POST", "/account/ios/identifiers/listApplicationGroups.action")
            .match_body(page(number))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "resultCode": 0,
                    "applicationGroupList": [{"applicationGroup": format!("G{number}")}],
                    "totalRecords": 2,
                    "pageSize": 1
                })
                .to_string(),
            )
            .create_async()
            .await;
    }
    let third = server
        .mock("POST", "/account/ios/identifiers/listApplicationGroups.action")
        .match_body(page(3))
        .expect(0)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let groups = client.app_groups().await.unwrap();

    assert_eq!(groups.len(), 2);
    third.assert_async().await;
}

#[tokio::test]
async fn test_failing_page_discards_everything() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    server
        .mock("POST", "/account/ios/identifiers/listWebsitePushIds.action")
        .match_body(page(1))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::envelope("websitePushIdList", json!([{"name": "W"}])))
        .create_async()
        .await;
    server
        .mock("POST", "/account/ios/identifiers/listWebsitePushIds.action")
        .match_body(page(2))
        .with_status(500)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let result = client.website_pushes(Platform::Ios).await;

    assert!(matches!(result, Err(AppError::Unexpected(status)) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_certificate_download_without_marker_is_unexpected() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let body = "<html><body>Your session has expired</body></html>";
    server
        .mock("GET", "/account/ios/certificate/downloadCertificateContent.action")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("teamId".to_string(), "1".to_string()),
            Matcher::UrlEncoded("certificateId".to_string(), "C1".to_string()),
            Matcher::UrlEncoded("type".to_string(), "R58UK2EWSO".to_string()),
        ]))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let result = client
        .download_certificate("C1", "R58UK2EWSO", Platform::Ios)
        .await;

    match result {
        Err(AppError::UnexpectedResponse(received)) => assert_eq!(received, body),
        other => panic!("unexpected result: {other:?}"),
    }
}

/// DER prefix of a certificate issued by Apple; not valid UTF-8
fn der_certificate() -> Vec<u8> {
    let mut der = vec![0x30, 0x82, 0x05, 0x8c, 0x30, 0x82, 0x04, 0x74];
    der.extend_from_slice(b"Apple Inc.1\x0b0\t");
    der.extend_from_slice(&[0xff, 0xfe, 0x00, 0x9a]);
    der
}

#[tokio::test]
async fn test_certificate_download_keeps_binary_content() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let content = der_certificate();
    server
        .mock("GET", "/account/ios/certificate/downloadCertificateContent.action")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/x-x509-ca-cert")
        .with_body(&content)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let downloaded = client
        .download_certificate("C1", "R58UK2EWSO", Platform::Ios)
        .await
        .unwrap();

    assert_eq!(downloaded, content);
}

#[tokio::test]
async fn test_profile_download_checks_plist_header() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let primer = server
        .mock("POST", "/account/ios/profile/listProvisioningProfiles.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("csrf", "profile-token")
        .with_body(common::envelope("provisioningProfiles", json!([])))
        .expect(2)
        .create_async()
        .await;
    // CMS wrapper bytes around the embedded property list.
    let mut profile = vec![0x30, 0x80, 0x06, 0x09, 0x2a, 0x86, 0x48];
    profile.extend_from_slice(
        b"<?xml version=\"1.0\"?><!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\">",
    );
    profile.extend_from_slice(&[0xa0, 0x82, 0x0e]);
    let download = server
        .mock("GET", "/account/ios/profile/downloadProfileContent")
        .match_header("csrf", "profile-token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("teamId".to_string(), "1".to_string()),
            Matcher::UrlEncoded("provisioningProfileId".to_string(), "PP1".to_string()),
        ]))
        .with_status(200)
        .with_body(&profile)
        .expect(1)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let downloaded = client
        .download_provisioning_profile("PP1", Platform::Ios)
        .await
        .unwrap();

    assert_eq!(downloaded, profile);
    primer.assert_async().await;
    download.assert_async().await;
}

#[tokio::test]
async fn test_profile_download_without_plist_header_is_unexpected() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    server
        .mock("POST", "/account/ios/profile/listProvisioningProfiles.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("csrf", "profile-token")
        .with_body(common::envelope("provisioningProfiles", json!([])))
        .create_async()
        .await;
    let body = "<html><body>Profile not found</body></html>";
    server
        .mock("GET", "/account/ios/profile/downloadProfileContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let result = client
        .download_provisioning_profile("PP1", Platform::Ios)
        .await;

    match result {
        Err(AppError::UnexpectedResponse(received)) => assert_eq!(received, body),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_profile_repair_joins_certificates_and_create_repeats_them() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let primer = server
        .mock("POST", "/account/ios/profile/listProvisioningProfiles.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("csrf", "profile-token")
        .with_body(common::envelope("provisioningProfiles", json!([])))
        .expect(2)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/account/ios/profile/createProvisioningProfile.action")
        .match_header("csrf", "profile-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("provisioningProfileName".to_string(), "Dev".to_string()),
            Matcher::UrlEncoded("distributionType".to_string(), "limited".to_string()),
            Matcher::UrlEncoded("appIdId".to_string(), "APP1".to_string()),
            Matcher::Regex("certificateIds=C1&certificateIds=C2".to_string()),
            Matcher::UrlEncoded("deviceIds".to_string(), "D1".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::envelope(
            "provisioningProfile",
            json!({"provisioningProfileId": "PP1"}),
        ))
        .expect(1)
        .create_async()
        .await;
    let repair = server
        .mock("POST", "/account/ios/profile/regenProvisioningProfile.action")
        .match_header("csrf", "profile-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("provisioningProfileId".to_string(), "PP1".to_string()),
            Matcher::UrlEncoded("provisioningProfileName".to_string(), "Dev".to_string()),
            Matcher::UrlEncoded("certificateIds".to_string(), "C1,C2".to_string()),
            Matcher::UrlEncoded("deviceIds".to_string(), "D1".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::envelope(
            "provisioningProfile",
            json!({"provisioningProfileId": "PP1", "status": "Active"}),
        ))
        .expect(1)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let request = ProfileRequest::new("Dev", "limited", "APP1")
        .with_certificates(&["C1", "C2"])
        .with_devices(&["D1"]);
    client.create_provisioning_profile(&request).await.unwrap();
    let repaired = client
        .repair_provisioning_profile("PP1", &request)
        .await
        .unwrap();

    assert_json_include!(actual: repaired, expected: json!({"status": "Active"}));
    primer.assert_async().await;
    create.assert_async().await;
    repair.assert_async().await;
}

#[tokio::test]
async fn test_profiles_via_xcode_decode_plist() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let plist = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>resultCode</key><integer>0</integer>
    <key>provisioningProfiles</key>
    <array>
        <dict>
            <key>provisioningProfileId</key><string>PP1</string>
            <key>name</key><string>Dev</string>
            <key>appId</key>
            <dict><key>identifier</key><string>com.example.app</string></dict>
        </dict>
    </array>
</dict>
</plist>"#;
    let xcode = server
        .mock("POST", "/xcode/ios/listProvisioningProfiles.action")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("teamId".to_string(), "1".to_string()),
            Matcher::UrlEncoded("includeInactiveProfiles".to_string(), "true".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/x-xml-plist")
        .with_body(plist)
        .expect(1)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let profiles = client
        .provisioning_profiles_via_xcode(Platform::Ios)
        .await
        .unwrap();

    xcode.assert_async().await;
    assert_json_eq!(
        json!(profiles),
        json!([{
            "provisioningProfileId": "PP1",
            "name": "Dev",
            "appId": {"identifier": "com.example.app"}
        }])
    );
}

#[tokio::test]
async fn test_failed_envelope_carries_server_message() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    server
        .mock("POST", "/account/ios/identifiers/getAppIdDetail.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "resultCode": 35,
                "resultString": "Invalid",
                "userString": "There is no App ID with ID 'NOPE'"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let error = client
        .app_details("NOPE", Platform::Ios)
        .await
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "request failed: There is no App ID with ID 'NOPE'"
    );
}

#[tokio::test]
async fn test_app_group_name_is_sanitized() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    server
        .mock("POST", "/account/ios/identifiers/listApplicationGroups.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("csrf", "group-token")
        .with_body(common::envelope("applicationGroupList", json!([])))
        .expect(2)
        .create_async()
        .await;
    let expected_name = format!("Cafe {}", md5_hex("Café"));
    let create = server
        .mock("POST", "/account/ios/identifiers/addApplicationGroup.action")
        .match_header("csrf", "group-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".to_string(), expected_name),
            Matcher::UrlEncoded("identifier".to_string(), "group.com.example".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::envelope(
            "applicationGroup",
            json!({"applicationGroup": "G1", "identifier": "group.com.example"}),
        ))
        .expect(1)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let group = client
        .create_app_group("Café", "group.com.example")
        .await
        .unwrap();

    create.assert_async().await;
    assert_json_include!(actual: group, expected: json!({"applicationGroup": "G1"}));
}

#[tokio::test]
async fn test_team_member_endpoints_send_json() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let members = server
        .mock("POST", "/account/getTeamMembers")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"teamId": "1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("csrf", "member-token")
        .with_body(json!([{"teamMemberId": "M1", "person": {"firstName": "Ada"}}]).to_string())
        .expect(2)
        .create_async()
        .await;
    let set_role = server
        .mock("POST", "/account/setTeamMemberRoles")
        .match_header("csrf", "member-token")
        .match_body(Matcher::Json(json!({
            "teamId": "1",
            "role": "admin",
            "teamMemberIds": ["M1"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"resultCode": 0}).to_string())
        .expect(1)
        .create_async()
        .await;
    let invite = server
        .mock("POST", "/account/sendInvites")
        .match_body(Matcher::Json(json!({
            "invites": [{"recipientEmail": "new@example.com", "recipientRole": "member"}],
            "teamId": "1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"resultCode": 0}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let result = client.set_team_member_role("M1", "admin").await.unwrap();
    assert_json_eq!(result, json!({"resultCode": 0}));
    client
        .invite_team_member("new@example.com", "member")
        .await
        .unwrap();

    members.assert_async().await;
    set_role.assert_async().await;
    invite.assert_async().await;
}

#[tokio::test]
async fn test_create_device_returns_first_record() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    server
        .mock("POST", "/account/mac/device/listDevices.action")
        .expect(0)
        .create_async()
        .await;
    server
        .mock("POST", "/account/ios/device/listDevices.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("csrf", "device-token")
        .with_body(common::envelope("devices", json!([])))
        .expect(2)
        .create_async()
        .await;
    server
        .mock("POST", "/account/mac/device/addDevices.action")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("deviceClasses".to_string(), "mac".to_string()),
            Matcher::UrlEncoded("deviceNumbers".to_string(), "UDID-1".to_string()),
            Matcher::UrlEncoded("register".to_string(), "single".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::envelope(
            "devices",
            json!([{"deviceId": "D9", "name": "Mac mini"}]),
        ))
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;
    let device = client
        .create_device("Mac mini", "UDID-1", Platform::Mac)
        .await
        .unwrap();

    assert_eq!(device["deviceId"], "D9");
}
