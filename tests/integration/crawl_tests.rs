//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing and detail pages and run the
//! real HTTP context against an on-disk SQLite store.

use fightstats_scraper::config::{Config, PageErrorPolicy, SiteConfig};
use fightstats_scraper::crawler::{Crawler, HttpContext};
use fightstats_scraper::storage::{SqliteStore, Store};
use fightstats_scraper::ScrapeError;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IDENTITY: &str = "TestAgent/1.0";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, letters: &str, db_path: &str) -> Config {
    let mut config = Config::default();
    config.site = SiteConfig {
        events_url: format!("{}/statistics/events/completed?page=all", base_url),
        fighters_url_template: format!("{}/statistics/fighters?char={{letter}}&page=all", base_url),
        letters: letters.to_string(),
    };
    config.user_agent.identity = IDENTITY.to_string();
    config.crawler.timeout = 5;
    config.output.database_path = db_path.to_string();
    config
}

fn db_path(dir: &TempDir) -> String {
    dir.path().join("stats.db").to_string_lossy().into_owned()
}

fn listing_html(links: &[String]) -> String {
    let rows: String = links
        .iter()
        .map(|href| {
            format!(
                r#"<tr class="b-statistics__table-row">
                  <td class="b-statistics__table-col">
                    <i class="b-statistics__table-content">
                      <a href="{}" class="b-link b-link_style_black">link</a>
                    </i>
                  </td>
                </tr>"#,
                href
            )
        })
        .collect();
    format!(
        r#"<html><body><table class="b-statistics__table-events"><tbody>
        <tr class="b-statistics__table-row_type_first"><td></td></tr>
        <tr class="b-statistics__table-row"><td class="b-statistics__table-col_type_clear"></td></tr>
        {}
        </tbody></table></body></html>"#,
        rows
    )
}

fn event_html(name: &str, date: &str, location: &str) -> String {
    format!(
        r#"<html><body>
        <h2 class="b-content__title">
          <span class="b-content__title-highlight">
            {}
          </span>
        </h2>
        <div class="b-list__info-box b-list__info-box_style_large-width">
          <ul class="b-list__box-list">
            <li class="b-list__box-list-item">
              <i class="b-list__box-item-title">Date:</i>
              {}
            </li>
            <li class="b-list__box-list-item">
              <i class="b-list__box-item-title">Location:</i>
              {}
            </li>
          </ul>
        </div>
        </body></html>"#,
        name, date, location
    )
}

fn fighter_html(name: &str, stats: &[(&str, &str)]) -> String {
    let items: String = stats
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<li class="b-list__box-list-item b-list__box-list-item_type_block">
                  <i class="b-list__box-item-title b-list__box-item-title_type_width">
                    {}
                  </i>
                  {}
                </li>"#,
                label, value
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <section class="b-statistics__section_details">
          <div class="l-page__container">
            <h2 class="b-content__title">
              <span class="b-content__title-highlight">{}</span>
            </h2>
            <div class="b-list__info-box b-fight-details">
              <ul class="b-list__box-list">{}</ul>
            </div>
          </div>
        </section>
        </body></html>"#,
        name, items
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_fighter_listing(server: &MockServer, letter: &str, links: &[String]) {
    Mock::given(method("GET"))
        .and(path("/statistics/fighters"))
        .and(query_param("char", letter))
        .and(query_param("page", "all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(links))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts two events and fighters under letters a and b
async fn mount_site(server: &MockServer) {
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/statistics/events/completed"))
        .and(query_param("page", "all"))
        .and(header("user-agent", IDENTITY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&[
                    format!("{}/event-details/e1", base_url),
                    format!("{}/event-details/e2", base_url),
                ]))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;

    mount_page(
        server,
        "/event-details/e1",
        event_html("UFC 311: Makhachev vs. Moicano", "January 18, 2025", "Inglewood, California, USA"),
    )
    .await;
    mount_page(
        server,
        "/event-details/e2",
        event_html("UFC Fight Night: Dern vs. Ribas 2", "January 11, 2025", "Las Vegas, Nevada, USA"),
    )
    .await;

    mount_fighter_listing(
        server,
        "a",
        &[format!("{}/fighter-details/f1", base_url)],
    )
    .await;
    // Relative href, resolved against the listing page
    mount_fighter_listing(server, "b", &["/fighter-details/f2".to_string()]).await;

    mount_page(
        server,
        "/fighter-details/f1",
        fighter_html(
            "Jon Jones",
            &[
                ("Height:", "6' 4\""),
                ("Weight:", "248 lbs."),
                ("Reach:", "84\""),
                ("STANCE:", "Orthodox"),
                ("DOB:", "Jul 19, 1987"),
                ("SLpM:", "4.29"),
                ("Str. Acc.:", "57%"),
                ("SApM:", "2.22"),
                ("Str. Def:", "64%"),
                ("TD Avg.:", "1.93"),
                ("TD Acc.:", "45%"),
                ("TD Def.:", "95%"),
                ("Sub. Avg.:", "0.5"),
            ],
        ),
    )
    .await;
    mount_page(
        server,
        "/fighter-details/f2",
        fighter_html(
            "Shogun",
            &[
                ("Height:", "--"),
                ("Weight:", "205 lbs."),
                ("Reach:", "--"),
                ("SLpM:", "0.00"),
                ("Str. Acc.:", "0%"),
                ("Sub. Avg.:", "0.0"),
            ],
        ),
    )
    .await;
}

async fn run_full_crawl(config: Config) -> Result<SqliteStore, ScrapeError> {
    let context = HttpContext::new(&config.user_agent, &config.crawler)?;
    let store = SqliteStore::new(std::path::Path::new(&config.output.database_path))?;
    let mut crawler = Crawler::new(config, context, store);
    crawler.run().await?;
    Ok(crawler.into_store())
}

#[tokio::test]
async fn test_full_crawl_stores_events_and_fighters() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = TempDir::new().unwrap();

    let store = run_full_crawl(create_test_config(&server.uri(), "ab", &db_path(&dir)))
        .await
        .expect("crawl should succeed");

    let events = store.list_events().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "UFC 311: Makhachev vs. Moicano");
    assert_eq!(events[0].date.as_deref(), Some("2025-01-18"));
    assert_eq!(events[0].location.as_deref(), Some("Inglewood, California, USA"));
    assert_eq!(events[1].location.as_deref(), Some("Las Vegas, Nevada, USA"));

    let fighters = store.list_fighters().unwrap();
    assert_eq!(fighters.len(), 2);

    let jones = &fighters[0];
    assert_eq!(jones.first_name, "Jon");
    assert_eq!(jones.last_name, "Jones");
    assert_eq!(jones.height.as_deref(), Some("6' 4\""));
    assert_eq!(jones.weight, Some(248));
    assert_eq!(jones.reach, Some(84));
    assert_eq!(jones.stance.as_deref(), Some("Orthodox"));
    assert_eq!(jones.str_acc, Some(0.57));
    assert_eq!(jones.td_def, Some(0.95));
    assert_eq!(jones.sub_avg, Some(0.5));

    let shogun = &fighters[1];
    assert_eq!(shogun.first_name, "Shogun");
    assert_eq!(shogun.last_name, "");
    assert_eq!(shogun.height, None);
    assert_eq!(shogun.weight, Some(205));
    assert_eq!(shogun.reach, None);
    assert_eq!(shogun.slpm, None);
    assert_eq!(shogun.str_acc, None);
    assert_eq!(shogun.sub_avg, None);
}

#[tokio::test]
async fn test_second_run_duplicates_rows() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    run_full_crawl(create_test_config(&server.uri(), "ab", &path))
        .await
        .unwrap();
    let store = run_full_crawl(create_test_config(&server.uri(), "ab", &path))
        .await
        .unwrap();

    assert_eq!(store.count_events().unwrap(), 4);
    assert_eq!(store.count_fighters().unwrap(), 4);
}

#[tokio::test]
async fn test_missing_title_aborts_crawl() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/statistics/events/completed",
        listing_html(&[
            format!("{}/event-details/good", base_url),
            format!("{}/event-details/untitled", base_url),
            format!("{}/event-details/never", base_url),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/event-details/good",
        event_html("UFC 1", "November 12, 1993", "Denver, Colorado, USA"),
    )
    .await;
    mount_page(
        &server,
        "/event-details/untitled",
        "<html><body><ul class=\"b-list__box-list\"></ul></body></html>".to_string(),
    )
    .await;
    mount_page(
        &server,
        "/event-details/never",
        event_html("UFC 2", "March 11, 1994", "Denver, Colorado, USA"),
    )
    .await;

    let path = db_path(&dir);
    let err = run_full_crawl(create_test_config(&base_url, "a", &path))
        .await
        .err()
        .expect("crawl should abort");
    assert!(matches!(err, ScrapeError::Extraction { .. }));

    let store = SqliteStore::new(std::path::Path::new(&path)).unwrap();
    let events = store.list_events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "UFC 1");
    assert_eq!(store.count_fighters().unwrap(), 0);
}

#[tokio::test]
async fn test_http_error_on_detail_page_is_navigation_error() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/statistics/events/completed",
        listing_html(&[format!("{}/event-details/down", base_url)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/event-details/down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = run_full_crawl(create_test_config(&base_url, "a", &db_path(&dir)))
        .await
        .err()
        .expect("crawl should abort");

    match err {
        ScrapeError::Navigation { url, message } => {
            assert!(url.ends_with("/event-details/down"));
            assert_eq!(message, "HTTP 500");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_skip_policy_survives_bad_pages() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    // Letter c lists one fighter with garbage stats and one missing page
    mount_fighter_listing(
        &server,
        "c",
        &[
            format!("{}/fighter-details/garbled", base_url),
            format!("{}/fighter-details/gone", base_url),
        ],
    )
    .await;
    mount_page(
        &server,
        "/fighter-details/garbled",
        fighter_html("Bad Data", &[("Weight:", "heavy")]),
    )
    .await;

    let mut config = create_test_config(&base_url, "abc", &db_path(&dir));
    config.crawler.on_page_error = PageErrorPolicy::Skip;

    let context = HttpContext::new(&config.user_agent, &config.crawler).unwrap();
    let store = SqliteStore::new(std::path::Path::new(&config.output.database_path)).unwrap();
    let mut crawler = Crawler::new(config, context, store);
    let summary = crawler.run_fighter_crawl().await.unwrap();

    assert_eq!(summary.listings, 3);
    assert_eq!(summary.pages_visited, 4);
    assert_eq!(summary.records_saved, 2);
    assert_eq!(summary.pages_skipped, 2);
    assert_eq!(crawler.store().count_fighters().unwrap(), 2);
}

#[tokio::test]
async fn test_path_relative_links_resolve_against_listing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/statistics/events/completed",
        listing_html(&[
            "details/e1".to_string(),
            "details/e2".to_string(),
            "details/e3".to_string(),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/statistics/events/details/e1",
        event_html("UFC 1", "November 12, 1993", "Denver, Colorado, USA"),
    )
    .await;
    mount_page(
        &server,
        "/statistics/events/details/e2",
        event_html("UFC 2", "March 11, 1994", "Denver, Colorado, USA"),
    )
    .await;
    mount_page(
        &server,
        "/statistics/events/details/e3",
        event_html("UFC 3", "September 24, 1994", "Charlotte, North Carolina, USA"),
    )
    .await;

    let config = create_test_config(&server.uri(), "a", &db_path(&dir));
    let context = HttpContext::new(&config.user_agent, &config.crawler).unwrap();
    let store = SqliteStore::new(std::path::Path::new(&config.output.database_path)).unwrap();
    let mut crawler = Crawler::new(config, context, store);

    let summary = crawler.run_event_crawl().await.expect("crawl should succeed");

    assert_eq!(summary.records_saved, 3);
    let names: Vec<_> = crawler
        .store()
        .list_events()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["UFC 1", "UFC 2", "UFC 3"]);
}

#[tokio::test]
async fn test_slow_page_hits_configured_timeout() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/statistics/events/completed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&[]))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = create_test_config(&server.uri(), "a", &db_path(&dir));
    config.crawler.timeout = 1;
    let context = HttpContext::new(&config.user_agent, &config.crawler).unwrap();
    let store = SqliteStore::new(std::path::Path::new(&config.output.database_path)).unwrap();
    let mut crawler = Crawler::new(config, context, store);

    match crawler.run_event_crawl().await {
        Err(ScrapeError::Navigation { message, .. }) => assert_eq!(message, "request timeout"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(summary) => panic!("crawl should time out, got {:?}", summary),
    }
}
