//! In-memory Ghost admin API (v0.1) for contract tests.
//!
//! Implements just enough of the server side to exercise the client:
//! password/refresh grants, revocation, current user, post CRUD, settings,
//! configuration and `If-None-Match` revalidation. State lives behind a
//! mutex shared by all connections.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use super::test_server::{self, Request, Response, TestServer};

pub const TEST_USER: &str = "user@example.com";
pub const TEST_PWD: &str = "ghosttest";
pub const CLIENT_SECRET: &str = "a1b2c3d4e5f6";
pub const EXPIRES_IN: u64 = 2_628_000;

const API_PREFIX: &str = "/ghost/api/v0.1/";

#[derive(Default)]
struct State {
    next_id: u64,
    next_token: u64,
    access_tokens: HashSet<String>,
    refresh_tokens: HashSet<String>,
    /// Oldest first.
    posts: Vec<Value>,
}

impl State {
    fn issue(&mut self, prefix: &str) -> String {
        self.next_token += 1;
        format!("{}-{}", prefix, self.next_token)
    }
}

pub fn start() -> TestServer {
    let state = Arc::new(Mutex::new(State::default()));
    test_server::start(move |req| {
        let mut state = state.lock().unwrap();
        conditional(req, handle(&mut state, req))
    })
}

/// Turns a GET whose `If-None-Match` equals the response `ETag` into a 304.
fn conditional(req: &Request, resp: Response) -> Response {
    let etag = resp
        .headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("ETag"))
        .map(|(_, v)| v.clone());
    match (req.method.as_str(), etag, req.header("If-None-Match")) {
        ("GET", Some(etag), Some(presented)) if resp.status == 200 && presented == etag => {
            Response::status(304).with_header("ETag", &etag)
        }
        _ => resp,
    }
}

fn error(status: u16, error_type: &str, message: &str) -> Response {
    Response::json(
        status,
        json!({ "errors": [{ "message": message, "errorType": error_type }] }),
    )
}

fn with_etag(resp: Response, tag: &str) -> Response {
    resp.with_header("ETag", &format!("W/\"{}\"", tag))
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn handle(state: &mut State, req: &Request) -> Response {
    let Some(route) = req.route().strip_prefix(API_PREFIX) else {
        return Response::status(404);
    };
    let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);

    match (req.method.as_str(), route) {
        ("GET", "configuration/") => with_etag(
            Response::json(
                200,
                json!({ "configuration": [
                    { "key": "clientSecret", "value": CLIENT_SECRET },
                    { "key": "fileStorage", "value": "true" },
                    { "key": "blogUrl", "value": "http://localhost:2368" }
                ]}),
            ),
            "config",
        ),
        ("POST", "authentication/token") => token(state, &body),
        ("POST", "authentication/revoke") => revoke(state, &body),
        _ => {
            if !authorized(state, req) {
                return error(401, "UnauthorizedError", "Access denied.");
            }
            authed(state, req, route, &body)
        }
    }
}

fn authorized(state: &State, req: &Request) -> bool {
    req.header("Authorization")
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|t| state.access_tokens.contains(t))
}

fn token(state: &mut State, body: &Value) -> Response {
    if body["client_secret"] != CLIENT_SECRET || body["client_id"] != "ghost-admin" {
        return error(401, "UnauthorizedError", "Access denied.");
    }
    match body["grant_type"].as_str() {
        Some("password") => {
            if body["username"] != TEST_USER {
                return error(404, "NotFoundError", "There is no user with that email address.");
            }
            if body["password"] != TEST_PWD {
                return error(401, "UnauthorizedError", "Your password is incorrect.");
            }
            let access = state.issue("access");
            let refresh = state.issue("refresh");
            state.access_tokens.insert(access.clone());
            state.refresh_tokens.insert(refresh.clone());
            Response::json(
                200,
                json!({
                    "access_token": access,
                    "refresh_token": refresh,
                    "expires_in": EXPIRES_IN,
                    "token_type": "Bearer"
                }),
            )
        }
        Some("refresh_token") => {
            let presented = body["refresh_token"].as_str().unwrap_or("");
            if !state.refresh_tokens.contains(presented) {
                return error(401, "UnauthorizedError", "Invalid refresh token.");
            }
            let access = state.issue("access");
            state.access_tokens.insert(access.clone());
            Response::json(
                200,
                json!({
                    "access_token": access,
                    "expires_in": EXPIRES_IN,
                    "token_type": "Bearer"
                }),
            )
        }
        _ => error(400, "BadRequestError", "Unsupported grant type."),
    }
}

fn revoke(state: &mut State, body: &Value) -> Response {
    let token = body["token"].as_str().unwrap_or("").to_string();
    match body["token_type_hint"].as_str() {
        Some("access_token") => {
            state.access_tokens.remove(&token);
        }
        Some("refresh_token") => {
            state.refresh_tokens.remove(&token);
        }
        _ => return error(400, "BadRequestError", "Missing token_type_hint."),
    }
    Response::json(200, json!({ "token": token }))
}

fn authed(state: &mut State, req: &Request, route: &str, body: &Value) -> Response {
    let segments: Vec<&str> = route.trim_end_matches('/').split('/').collect();
    match (req.method.as_str(), segments.as_slice()) {
        ("GET", ["configuration", "about"]) => with_etag(
            Response::json(
                200,
                json!({ "configuration": [{ "version": "0.11.14", "environment": "test" }] }),
            ),
            "about",
        ),
        ("GET", ["users", "me"]) => with_etag(
            Response::json(
                200,
                json!({ "users": [{
                    "id": "1",
                    "name": "Test User",
                    "slug": "test-user",
                    "email": TEST_USER,
                    "image": null,
                    "bio": null,
                    "roles": [{ "id": "4", "name": "Owner", "description": "Blog Owner" }]
                }]}),
            ),
            "me",
        ),
        ("GET", ["settings"]) => with_etag(
            Response::json(
                200,
                json!({ "settings": [
                    { "key": "title", "value": "Spectre Test Blog" },
                    { "key": "permalinks", "value": "/:slug/" },
                    { "key": "cover", "value": null }
                ]}),
            ),
            "settings",
        ),
        ("GET", ["posts"]) => {
            let limit = req
                .query("limit")
                .and_then(|l| l.parse::<usize>().ok())
                .unwrap_or(15);
            let posts: Vec<Value> = state.posts.iter().rev().take(limit).cloned().collect();
            with_etag(Response::json(200, json!({ "posts": posts })), "posts")
        }
        ("POST", ["posts"]) => {
            let Some(stub) = body["posts"].get(0) else {
                return error(400, "ValidationError", "No post given.");
            };
            state.next_id += 1;
            let markdown = stub["markdown"].as_str().unwrap_or("").to_string();
            let title = stub["title"].as_str().unwrap_or("").to_string();
            let post = json!({
                "id": state.next_id.to_string(),
                "uuid": format!("uuid-{}", state.next_id),
                "title": title,
                "slug": slugify(&title),
                "status": stub["status"].as_str().unwrap_or("draft"),
                "markdown": markdown,
                "html": format!("<p>{}</p>", markdown),
                "tags": stub["tags"].clone(),
                "featured": false,
                "page": false
            });
            state.posts.push(post.clone());
            Response::json(201, json!({ "posts": [post] }))
        }
        ("GET", ["posts", id]) => match state.posts.iter().find(|p| p["id"] == *id) {
            Some(post) => Response::json(200, json!({ "posts": [post] })),
            None => error(404, "NotFoundError", "Post not found."),
        },
        ("PUT", ["posts", id]) => {
            let Some(stub) = body["posts"].get(0).cloned() else {
                return error(400, "ValidationError", "No post given.");
            };
            let Some(post) = state.posts.iter_mut().find(|p| p["id"] == *id) else {
                return error(404, "NotFoundError", "Post not found.");
            };
            for key in ["title", "status", "markdown", "featured"] {
                if !stub[key].is_null() {
                    post[key] = stub[key].clone();
                }
            }
            let markdown = post["markdown"].as_str().unwrap_or("").to_string();
            post["html"] = json!(format!("<p>{}</p>", markdown));
            Response::json(200, json!({ "posts": [post.clone()] }))
        }
        ("DELETE", ["posts", id]) => {
            let before = state.posts.len();
            state.posts.retain(|p| p["id"] != *id);
            if state.posts.len() == before {
                error(404, "NotFoundError", "Post not found.")
            } else {
                Response::status(204)
            }
        }
        _ => error(404, "NotFoundError", "Resource not found."),
    }
}
