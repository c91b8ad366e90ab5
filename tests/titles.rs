//! Title and resource operations against a wiremock RMAPI.

use holdingsiq::{
    delete_resource, get_resource, get_titles, get_titles_by_query, select_resource,
    update_resource, Create, FilterQuery, Get, HoldingsClient, List, PackageId, ResourceId,
    ResourcePut, ResourceSelectedPayload, Title, TitleListQuery, TitlePost,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HoldingsClient {
    HoldingsClient::new("CUST", "KEY", &server.uri()).unwrap()
}

fn title_json(id: u64, resources: usize) -> serde_json::Value {
    let resources: Vec<_> = (0..resources)
        .map(|i| {
            serde_json::json!({
                "titleId": id,
                "packageId": 3964 + i as u64,
                "vendorId": 19,
                "isSelected": true
            })
        })
        .collect();
    serde_json::json!({
        "titleId": id,
        "titleName": format!("Title {id}"),
        "customerResourcesList": resources
    })
}

#[tokio::test]
async fn test_search_titles_by_isxn() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/titles"))
        .and(query_param("searchfield", "isxn"))
        .and(query_param("selection", "selected"))
        .and(query_param("resourcetype", "all"))
        .and(query_param("searchtype", "advanced"))
        .and(query_param("search", "1362-3613"))
        .and(query_param("orderby", "titlename"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalResults": 1,
            "titles": [title_json(1, 1)]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = TitleListQuery {
        filter: FilterQuery {
            selected: Some("selected".to_string()),
            ..FilterQuery::by_isxn("1362-3613")
        },
        ..Default::default()
    };
    let titles = get_titles(&client(&mock_server), &query, 1, 25).await.unwrap();
    assert_eq!(titles.total_results, Some(1));
}

#[tokio::test]
async fn test_titles_without_resources_are_dropped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/vendors/19/packages/3964/titles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalResults": 40,
            "titles": [title_json(1, 1), title_json(2, 0), null, title_json(3, 2)]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = TitleListQuery {
        package: Some(PackageId::new(19, 3964)),
        filter: FilterQuery::by_name("title"),
        ..Default::default()
    };
    let page = Title::list_page(&client(&mock_server), &query, 1, 25)
        .await
        .unwrap();

    assert_eq!(page.total, Some(38));
    let ids: Vec<u64> = page.items.iter().map(|t| t.title_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_list_all_titles_keeps_paging_past_dropped_titles() {
    let mock_server = MockServer::start().await;

    // Half of page 1 has no resources, which lowers the filtered total to 100
    let first: Vec<_> = (1..=100)
        .map(|id| title_json(id, if id % 2 == 0 { 0 } else { 1 }))
        .collect();
    let second: Vec<_> = (101..=150).map(|id| title_json(id, 1)).collect();

    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/titles"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalResults": 150,
            "titles": first
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/titles"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalResults": 150,
            "titles": second
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = TitleListQuery {
        filter: FilterQuery::by_name("title"),
        ..Default::default()
    };
    let titles = Title::list_all(&client(&mock_server), &query).await.unwrap();

    assert_eq!(titles.len(), 100);
    assert_eq!(titles.last().map(|t| t.title_id), Some(150));
}

#[tokio::test]
async fn test_titles_by_raw_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/titles"))
        .and(query_param("searchfield", "publisher"))
        .and(query_param("search", "wiley"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "titles": [title_json(9, 1)]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let titles = get_titles_by_query(
        &client(&mock_server),
        "searchfield=publisher&search=wiley&offset=1&count=25",
    )
    .await
    .unwrap();
    assert_eq!(titles.total_results, Some(0));
    assert_eq!(titles.into_titles().len(), 1);
}

#[tokio::test]
async fn test_create_custom_title_then_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rm/rmaccounts/CUST/vendors/123356/packages/77/titles"))
        .and(body_json(serde_json::json!({"titleName": "My Title", "pubType": "Book"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"titleId": 5})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/titles/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_json(5, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let post = TitlePost {
        title_name: "My Title".to_string(),
        pub_type: Some("Book".to_string()),
        ..Default::default()
    };
    let title = Title::create(&client(&mock_server), PackageId::new(123356, 77), post)
        .await
        .unwrap();
    assert_eq!(title.title_id, 5);
}

#[tokio::test]
async fn test_get_title() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/titles/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_json(5, 2)))
        .mount(&mock_server)
        .await;

    let title = Title::get(&client(&mock_server), 5).await.unwrap();
    assert_eq!(title.resources().len(), 2);
}

#[tokio::test]
async fn test_select_resource_then_read_back() {
    let mock_server = MockServer::start().await;
    let id = ResourceId::new(19, 3964, 5);

    Mock::given(method("PUT"))
        .and(path("/rm/rmaccounts/CUST/vendors/19/packages/3964/titles/5"))
        .and(body_json(serde_json::json!({"isSelected": true})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/vendors/19/packages/3964/titles/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_json(5, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resource = select_resource(
        &client(&mock_server),
        id,
        &ResourceSelectedPayload::selected(true),
    )
    .await
    .unwrap();
    assert!(resource.resources()[0].is_selected);
}

#[tokio::test]
async fn test_update_and_delete_resource() {
    let mock_server = MockServer::start().await;
    let id: ResourceId = "19-3964-5".parse().unwrap();

    Mock::given(method("PUT"))
        .and(path("/rm/rmaccounts/CUST/vendors/19/packages/3964/titles/5"))
        .and(body_json(serde_json::json!({"url": "https://example.org"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/rm/rmaccounts/CUST/vendors/19/packages/3964/titles/5"))
        .and(body_json(serde_json::json!({"isSelected": false})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let put = ResourcePut {
        url: Some("https://example.org".to_string()),
        ..Default::default()
    };
    update_resource(&client, id, &put).await.unwrap();
    delete_resource(&client, id).await.unwrap();
}

#[tokio::test]
async fn test_get_missing_resource() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rm/rmaccounts/CUST/vendors/19/packages/3964/titles/6"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = get_resource(&client(&mock_server), ResourceId::new(19, 3964, 6))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}
