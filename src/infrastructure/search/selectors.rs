// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::Device;
use scraper::Selector;
use thiserror::Error;

/// 一组结果区块的 CSS 选择器
///
/// 桌面端与移动端的页面结构平行，两张表字段一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorTable {
    pub container: &'static str,
    pub site_name: &'static str,
    pub display_url: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const DESKTOP_SELECTORS: SelectorTable = SelectorTable {
    container: "div.nad_area ul.lst_type > li",
    site_name: "a.site",
    display_url: "span.lnk_url_area > a.lnk_url",
    title: "a.lnk_head span.lnk_tit",
    description: "a.link_desc",
};

pub const MOBILE_SELECTORS: SelectorTable = SelectorTable {
    container: "div.api_subject_bx ul.lst_total > li",
    site_name: "span.site",
    display_url: "span.url",
    title: "div.tit_area span.tit",
    description: "a.desc",
};

impl SelectorTable {
    pub fn for_device(device: Device) -> &'static SelectorTable {
        match device {
            Device::Desktop => &DESKTOP_SELECTORS,
            Device::Mobile => &MOBILE_SELECTORS,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid selector `{selector}`: {message}")]
pub struct SelectorError {
    pub selector: &'static str,
    pub message: String,
}

/// 预编译的选择器表
#[derive(Debug)]
pub struct CompiledSelectors {
    pub container: Selector,
    pub site_name: Selector,
    pub display_url: Selector,
    pub title: Selector,
    pub description: Selector,
}

impl CompiledSelectors {
    pub fn compile(table: &SelectorTable) -> Result<Self, SelectorError> {
        Ok(Self {
            container: parse(table.container)?,
            site_name: parse(table.site_name)?,
            display_url: parse(table.display_url)?,
            title: parse(table.title)?,
            description: parse(table.description)?,
        })
    }
}

fn parse(selector: &'static str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        selector,
        message: format!("{:?}", e),
    })
}
