use std::net::SocketAddr;

use bookstore_app::client::{CatalogClient, ClientError};
use bookstore_kernel::settings::Settings;
use reqwest::StatusCode;
use tokio::net::TcpListener;

async fn start_server() -> anyhow::Result<String> {
    let app = bookstore_app::build_app(&Settings::default())?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

#[tokio::test]
async fn fetches_catalog_over_http() -> anyhow::Result<()> {
    let client = CatalogClient::new(&start_server().await?)?;

    let books = client.all_books().await?;
    assert_eq!(books.len(), 10);
    assert_eq!(books.books()[9].isbn, "10");

    let book = client.book_by_isbn("1").await?;
    assert_eq!(book.title, "Things Fall Apart");

    let by_author = client.books_by_author("chinua achebe").await?;
    assert_eq!(by_author, vec![book.clone()]);

    let by_title = client.book_by_title("Things Fall Apart").await?;
    assert_eq!(by_title, book);

    let reviews = client.reviews("1").await?;
    assert!(reviews.is_empty());
    Ok(())
}

#[tokio::test]
async fn surfaces_service_error_message() -> anyhow::Result<()> {
    let client = CatalogClient::new(&start_server().await?)?;

    match client.book_by_isbn("999").await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "ISBN not found");
        }
        other => panic!("expected a 404, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_http_error() -> anyhow::Result<()> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = CatalogClient::new(&format!("http://{addr}"))?;
    assert!(matches!(client.all_books().await, Err(ClientError::Http(_))));
    Ok(())
}
