use http_client::Request;

/// Common Chrome user agent string for all requests
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Add headers shared by every request
pub fn add_common_headers(request: &mut Request) {
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Accept-Language", "en-US,en;q=0.9");
}

/// Add headers for scraped HTML pages
pub fn add_page_headers(request: &mut Request) {
    add_common_headers(request);
    let _ = request.insert_header("Accept", HTML_ACCEPT);
    let _ = request.insert_header("Upgrade-Insecure-Requests", "1");
}

/// Add headers for JSON API calls
pub fn add_api_headers(request: &mut Request) {
    add_common_headers(request);
    let _ = request.insert_header("Accept", "application/json");
}
