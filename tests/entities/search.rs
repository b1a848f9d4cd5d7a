use httpmock::Method::POST;
use httpmock::MockServer;

use crate::common;

#[tokio::test]
async fn search_reports_total_and_steps_pages() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=artist.search")
            .body_includes("page=1");
        then.status(200).body(common::read_fixture("artist_search_cher.xml"));
    });
    let second = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=artist.search")
            .body_includes("page=2");
        then.status(200).body(common::ok_body(
            "<results for=\"cher\"><artistmatches></artistmatches></results>",
        ));
    });

    let network = common::builder(&server).cache_in_memory().build().unwrap();
    let mut search = network.search_artist("cher").limit(2);

    assert_eq!(search.total_results().await.unwrap(), 386);

    let page = search.next_page().await.unwrap();
    let names: Vec<&str> = page.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Cher", "Cher Lloyd"]);
    assert_eq!(search.last_page(), 1);

    assert!(search.next_page().await.unwrap().is_empty());
    assert_eq!(search.last_page(), 2);

    // total_results and the first page share one cached response
    first.assert_calls(1);
    second.assert_calls(1);
}
