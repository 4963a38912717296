// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::Rng;
use std::collections::BTreeMap;

const USER_AGENTS: &[&str] = &[
    // Desktop Chrome
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.7123.45 Safari/537.36",
    // Desktop Edge
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36 Edg/137.0.0.0",
    // Desktop Firefox
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:138.0) Gecko/20100101 Firefox/138.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7; rv:138.0) Gecko/20100101 Firefox/138.0",
    // Android Chrome
    "Mozilla/5.0 (Linux; Android 14; SM-S918N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Mobile Safari/537.36",
    // iOS Safari
    "Mozilla/5.0 (iPhone; CPU iPhone OS 18_4_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Mobile/15E148 Safari/604.1",
];

const REFERERS: &[&str] = &[
    "https://www.naver.com/",
    "https://search.naver.com/",
    "https://www.google.com/",
    "https://www.daum.net/",
    "https://news.naver.com",
    "https://m.sports.naver.com",
    "https://map.naver.com",
    "https://shopping.naver.com",
];

const ACCEPT_LANGUAGES: &[&str] = &[
    "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7",
    "en-US,en;q=0.9,ko;q=0.8",
    "ko;q=0.9,en;q=0.8",
];

const ACCEPTS: &[&str] = &[
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
    "text/html,application/xml;q=0.9,*/*;q=0.8",
    "text/html;q=0.8,application/xhtml+xml;q=0.9,image/webp,*/*;q=0.7",
];

const CONNECTIONS: &[&str] = &["keep-alive"];
const CACHE_CONTROLS: &[&str] = &["no-cache"];
const UPGRADE_INSECURE_REQUESTS: &[&str] = &["1"];
const DNTS: &[&str] = &["1"];

const ORIGINS: &[&str] = &[
    "https://www.naver.com",
    "https://search.naver.com",
    "https://www.google.com",
    "https://www.daum.net/",
    "https://news.naver.com",
    "https://m.sports.naver.com",
    "https://map.naver.com",
    "https://finance.naver.com",
    "https://comic.naver.com/index",
];

const REQUESTED_WITH: &[&str] = &["XMLHttpRequest"];

const COOKIES: &[&str] = &[
    "NID=abc123; NNB=xyz456",
    "SID=9876543210; LANG=ko",
    "UID=11223344; PREF=lightmode",
    "NID_SES=AAABBBCCC; NID_AUT=ZZZYYYXXX",
    "NID_JKL=JKL123456; NNB=AAABBBCCC",
    "NNB=1a2b3c4d5e; NID=abcdefg1234567",
    "SID=0011223344; PREF=darkmode; LANG=en",
    "UID=55667788; THEME=default; NID=naverid987",
];

/// Headers present on every request, each value drawn uniformly from its list.
pub const MANDATORY_HEADERS: &[(&str, &[&str])] = &[
    ("User-Agent", USER_AGENTS),
    ("Referer", REFERERS),
    ("Accept-Language", ACCEPT_LANGUAGES),
    ("Accept", ACCEPTS),
    ("Connection", CONNECTIONS),
    ("Cache-Control", CACHE_CONTROLS),
    ("Upgrade-Insecure-Requests", UPGRADE_INSECURE_REQUESTS),
    ("DNT", DNTS),
];

/// Headers included independently with the given probability.
pub const OPTIONAL_HEADERS: &[(&str, f64, &[&str])] = &[
    ("Origin", 0.5, ORIGINS),
    ("X-Requested-With", 0.4, REQUESTED_WITH),
    ("Cookie", 0.3, COOKIES),
];

/// 随机请求头生成器
///
/// 每次请求生成一组看起来像真实浏览器的请求头，降低被识别为爬虫的概率。
/// 随机源由调用方传入，便于测试时使用固定种子。
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderGenerator;

impl HeaderGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> BTreeMap<&'static str, &'static str> {
        let mut headers = BTreeMap::new();

        for (name, candidates) in MANDATORY_HEADERS {
            headers.insert(*name, pick(rng, candidates));
        }

        for (name, probability, candidates) in OPTIONAL_HEADERS {
            if rng.random_bool(*probability) {
                headers.insert(*name, pick(rng, candidates));
            }
        }

        headers
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, candidates: &[&'static str]) -> &'static str {
    candidates[rng.random_range(0..candidates.len())]
}
