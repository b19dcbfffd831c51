use once_cell::sync::Lazy;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

fn unique_db_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "bitality_http_{}_{}.db",
        std::process::id(),
        unique_suffix()
    ));
    path.to_string_lossy().to_string()
}

fn unique_username(prefix: &str) -> String {
    format!("{prefix}{}", unique_suffix())
}

/// Client that keeps cookies but never follows redirects, so Location
/// headers can be asserted directly.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("build client")
}

async fn wait_until_ready(base_url: &str) {
    let probe = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = probe.get(format!("{base_url}/about")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(extra_env: &[(&str, &str)]) -> TestServer {
    let port = pick_free_port();
    let db_path = unique_db_path();
    let mut command = Command::new(env!("CARGO_BIN_EXE_bitality"));
    command
        .env("PORT", port.to_string())
        .env("HEALTH_DB_PATH", db_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    for (key, value) in extra_env {
        command.env(key, value);
    }
    let child = command.spawn().expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(&[]).await);
    *guard = Some(Arc::clone(&server));
    server
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Register and log in a fresh user, returning its username. The client's
/// cookie jar ends up holding an authenticated session.
async fn register_and_login(client: &Client, base_url: &str, prefix: &str) -> String {
    let username = unique_username("user");
    let password = "Secret1!pass";

    let response = client
        .post(format!("{base_url}{prefix}/users/register"))
        .form(&[("username", username.as_str()), ("password", password)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("{prefix}/users/login"),
        "register should redirect to login under the mount prefix"
    );

    let response = client
        .post(format!("{base_url}{prefix}/users/login"))
        .form(&[("username", username.as_str()), ("password", password)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("{prefix}/"));

    username
}

#[tokio::test]
async fn http_unauthenticated_protected_route_redirects_to_login() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let response = client()
        .get(format!("{}/fitness/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users/login");
}

#[tokio::test]
async fn http_forwarded_prefix_shapes_redirect_target() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let response = client()
        .get(format!("{}/fitness/add", server.base_url))
        .header("X-Forwarded-Prefix", "/team42")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/team42/users/login");
}

#[tokio::test]
async fn http_referrer_mount_shapes_redirect_target() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let response = client()
        .get(format!("{}/fitness/add", server.base_url))
        .header("Referer", "https://host.example/usr/355/fitness/add")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usr/355/users/login");
}

#[tokio::test]
async fn http_prefixed_self_path_is_routed() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    // The mount inferred from the path itself must be stripped before
    // routing, so this reaches the auth gate instead of the 404 handler.
    let response = client()
        .get(format!("{}/usr/9/fitness/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usr/9/users/login");
}

#[tokio::test]
async fn http_register_login_then_protected_page_serves() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = client();

    register_and_login(&client, &server.base_url, "").await;

    let response = client
        .get(format!("{}/fitness/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Add Workout"));
    assert!(body.contains("action=\"/fitness/add\""));
}

#[tokio::test]
async fn http_wrong_password_shows_generic_message() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = client();

    let username = register_and_login(&client, &server.base_url, "").await;

    // A fresh client with the right username but wrong password.
    let anonymous = self::client();
    let response = anonymous
        .post(format!("{}/users/login", server.base_url))
        .form(&[("username", username.as_str()), ("password", "Wrong1!pass")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid username or password"));

    let response = anonymous
        .get(format!("{}/fitness/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn http_weak_password_lists_requirements() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let response = client()
        .post(format!("{}/users/register", server.base_url))
        .form(&[
            ("username", unique_username("weak").as_str()),
            ("password", "short"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Password must be at least 8 chars long"));
}

#[tokio::test]
async fn http_logout_clears_session() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = client();

    register_and_login(&client, &server.base_url, "").await;

    let response = client
        .get(format!("{}/users/logout", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = client
        .get(format!("{}/fitness/profile", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users/login");
}

#[tokio::test]
async fn http_water_is_summed_per_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = client();

    register_and_login(&client, &server.base_url, "").await;

    let response = client
        .post(format!("{}/fitness/water", server.base_url))
        .form(&[("amount", "250")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Added 250ml!"));
    assert!(body.contains("Today: 250ml"));

    let response = client
        .post(format!("{}/fitness/water", server.base_url))
        .form(&[("amount", "500")])
        .send()
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Today: 750ml"));

    // Invalid amounts re-prompt and leave the total alone.
    let response = client
        .post(format!("{}/fitness/water", server.base_url))
        .form(&[("amount", "-10")])
        .send()
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Please enter a valid amount."));
    assert!(body.contains("Today: 750ml"));
}

#[tokio::test]
async fn http_configured_base_url_roots_every_link() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&[("BASE_URL", "/usr/7")]).await;
    let client = client();

    // Unauthenticated access redirects under the configured prefix.
    let response = client
        .get(format!("{}/fitness/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usr/7/users/login");

    // Prefixed external paths are served too, the way a non-stripping
    // reverse proxy would send them.
    register_and_login(&client, &server.base_url, "/usr/7").await;

    let response = client
        .get(format!("{}/usr/7/fitness/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("action=\"/usr/7/fitness/add\""));
    assert!(body.contains("href=\"/usr/7/users/logout\""));
}
