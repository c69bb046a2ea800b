//! Synthetic result set
//!
//! The guaranteed-availability path: ten items shaped exactly like live
//! results, built from fixed banks and random counters. No I/O, no
//! failure mode.

use rand::Rng;

use super::counts::{CountLabel, MOCK_RANGES, synthesize_with};
use super::types::ContentItem;
use crate::utils::PLATFORM_ORIGIN;

/// Placeholder replaced by the search keyword in title templates
const KEYWORD_SLOT: &str = "{keyword}";

const TITLE_TEMPLATES: [&str; 10] = [
    "{keyword}赚钱的10个渠道，每个都能月入过万",
    "在家就能做的5种{keyword}，学生党宝妈都适合",
    "我的{keyword}一年赚了20万，分享经验给大家",
    "零成本{keyword}项目，新手也能日赚300+",
    "{keyword}做什么最赚钱？这5个项目值得试试",
    "{keyword}兼职推荐，适合上班族的赚钱方法",
    "手机就能做的{keyword}，每天2小时月入5000",
    "大学生{keyword}指南，从0到月入过万的经历",
    "宝妈在家{keyword}，带娃赚钱两不误",
    "{keyword}变主业，我是如何实现财务自由的",
];

const AUTHORS: [&str; 10] = [
    "创业小达人",
    "副业达人Jane",
    "财富自由小姐姐",
    "副业教练Lisa",
    "赚钱小能手",
    "职场副业王",
    "手机赚钱达人",
    "大学生创业者",
    "宝妈创业小组",
    "财务自由达人",
];

const THUMBNAILS: [&str; 10] = [
    "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1563013544-824ae1b704d3?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1534951009808-766178b47a4f?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1560472355-536de3962603?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1551836022-deb4988cc6c0?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1512941937669-90a1b58e7e9c?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1517077304055-6e89abbf09b0?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=300&h=200&fit=crop",
    "https://images.unsplash.com/photo-1554224155-6726b3ff858f?w=300&h=200&fit=crop",
];

/// Number of items every synthetic result set contains
pub const MOCK_ITEM_COUNT: usize = TITLE_TEMPLATES.len();

/// Build the synthetic result set for `keyword`
#[must_use]
pub fn generate_mock_items(keyword: &str) -> Vec<ContentItem> {
    generate_mock_items_with(&mut rand::rng(), keyword)
}

/// Same as [`generate_mock_items`] with a caller-supplied RNG
pub fn generate_mock_items_with<R: Rng + ?Sized>(rng: &mut R, keyword: &str) -> Vec<ContentItem> {
    TITLE_TEMPLATES
        .iter()
        .zip(AUTHORS)
        .zip(THUMBNAILS)
        .enumerate()
        .map(|(index, ((template, author), thumbnail))| ContentItem {
            title: template.replace(KEYWORD_SLOT, keyword),
            author: author.to_string(),
            view_count: synthesize_with(&mut *rng, &MOCK_RANGES, CountLabel::Views),
            like_count: synthesize_with(&mut *rng, &MOCK_RANGES, CountLabel::Likes),
            link: format!("{PLATFORM_ORIGIN}/explore/mock-{}", index + 1),
            thumbnail: Some(thumbnail.to_string()),
        })
        .collect()
}
