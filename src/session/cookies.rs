// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token cookie handling.
//!
//! The bearer token lives in a cookie as well as in the session store so the
//! route guard can read it before the store has been restored. Both the
//! client jar and the edge guard agree on the cookie name and attributes
//! defined here.

use axum_extra::extract::cookie::{Cookie, SameSite};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use time::OffsetDateTime;

/// Name of the cookie carrying the bearer token.
pub const TOKEN_COOKIE: &str = "accessToken";

/// Lifetime of the token cookie.
pub const TOKEN_COOKIE_DAYS: i64 = 7;

/// Build the token cookie: 7-day expiry, `SameSite=Strict`, site-wide path.
pub fn token_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.to_string()))
        .path("/")
        .same_site(SameSite::Strict)
        .expires(OffsetDateTime::now_utc() + time::Duration::days(TOKEN_COOKIE_DAYS))
        .build()
}

fn is_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    cookie
        .expires_datetime()
        .map(|expires| expires <= now)
        .unwrap_or(false)
}

/// Cookie jar readable without going through the session store.
pub trait CookieStore: Send + Sync {
    /// Value of a live (unexpired) cookie.
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, cookie: Cookie<'static>);
    fn remove(&self, name: &str);
}

/// In-memory jar.
#[derive(Default)]
pub struct MemoryCookieStore {
    cookies: RwLock<HashMap<String, Cookie<'static>>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn all(&self) -> Vec<Cookie<'static>> {
        let cookies = self.cookies.read().unwrap_or_else(PoisonError::into_inner);
        cookies.values().cloned().collect()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.read().unwrap_or_else(PoisonError::into_inner);
        cookies
            .get(name)
            .filter(|c| !is_expired(c, OffsetDateTime::now_utc()))
            .map(|c| c.value().to_string())
    }

    fn set(&self, cookie: Cookie<'static>) {
        let mut cookies = self.cookies.write().unwrap_or_else(PoisonError::into_inner);
        cookies.insert(cookie.name().to_string(), cookie);
    }

    fn remove(&self, name: &str) {
        let mut cookies = self.cookies.write().unwrap_or_else(PoisonError::into_inner);
        cookies.remove(name);
    }
}

/// Jar backed by a file of `Set-Cookie` lines, rewritten on every change.
///
/// Write failures are logged and otherwise ignored; the in-memory copy
/// stays authoritative for the life of the process.
pub struct FileCookieStore {
    path: PathBuf,
    jar: MemoryCookieStore,
}

impl FileCookieStore {
    /// Open the jar, loading any unexpired cookies already on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let jar = MemoryCookieStore::new();

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let now = OffsetDateTime::now_utc();
                for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                    match Cookie::parse(line.to_string()) {
                        Ok(cookie) if !is_expired(&cookie, now) => jar.set(cookie),
                        Ok(_) => {}
                        Err(e) => tracing::warn!(error = %e, "Skipping unreadable cookie line"),
                    }
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "Failed to read cookie jar")
            }
        }

        Self { path, jar }
    }

    fn flush(&self) {
        if let Err(err) = self.write_jar() {
            tracing::warn!(error = %err, path = %self.path.display(), "Failed to write cookie jar");
        }
    }

    fn write_jar(&self) -> io::Result<()> {
        let lines: Vec<String> = self.jar.all().iter().map(|c| c.to_string()).collect();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write then rename so a crash never truncates the jar.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, lines.join("\n"))?;
        fs::rename(&tmp, &self.path)
    }
}

impl CookieStore for FileCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name)
    }

    fn set(&self, cookie: Cookie<'static>) {
        self.jar.set(cookie);
        self.flush();
    }

    fn remove(&self, name: &str) {
        self.jar.remove(name);
        self.flush();
    }
}
