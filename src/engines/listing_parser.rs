// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::models::product::RawProduct;

/// 商品卡片解析错误
///
/// 只用于记录跳过原因，不会传播到页面之外
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
    #[error("missing title")]
    MissingTitle,
    #[error("missing price")]
    MissingPrice,
    #[error("invalid price `{0}`")]
    InvalidPrice(String),
    #[error("missing image")]
    MissingImage,
    #[error("placeholder image `{0}`")]
    PlaceholderImage(String),
}

/// 商品列表解析特质
///
/// 每个实现对应一种列表页结构和一种分页方式
pub trait ListingParser: Send + Sync {
    /// 从首页HTML中得到总页数，没有分页控件时为1
    fn total_pages(&self, html: &str) -> u32;

    /// 解析一页中的全部商品，保持列表顺序，跳过不完整的卡片
    fn parse_products(&self, html: &str) -> Vec<RawProduct>;

    /// 第 `page` 页的地址
    fn page_url(&self, base_url: &str, page: u32) -> String {
        format!("{}page/{}/", base_url, page)
    }
}

/// 列表页CSS选择器
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// 分页容器
    pub pagination: String,
    /// 分页容器内的页码链接
    pub page_link: String,
    /// "下一页"链接的class
    pub next_class: String,
    /// 商品卡片
    pub product_card: String,
    /// 卡片内标题链接
    pub title: String,
    /// 价格容器
    pub price_box: String,
    /// 促销价节点，存在时优先于常规价
    pub sale_price: String,
    /// 常规价节点
    pub regular_price: String,
    /// 价格节点内的金额文本
    pub amount: String,
    /// 缩略图容器
    pub thumbnail: String,
    /// 缩略图容器内的图片
    pub image: String,
    /// 懒加载图片属性，优先于 `src`
    pub lazy_src_attr: String,
    /// 以此结尾的图片地址视为占位图
    pub placeholder_suffix: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            pagination: "ul.page-numbers".to_string(),
            page_link: "a.page-numbers".to_string(),
            next_class: "next".to_string(),
            product_card: "li.product".to_string(),
            title: "h2.woo-loop-product__title a".to_string(),
            price_box: "div.mf-product-price-box".to_string(),
            sale_price: "ins".to_string(),
            regular_price: "span.woocommerce-Price-amount".to_string(),
            amount: "bdi".to_string(),
            thumbnail: "div.mf-product-thumbnail".to_string(),
            image: "img".to_string(),
            lazy_src_attr: "data-lazy-src".to_string(),
            placeholder_suffix: "svg+xml".to_string(),
        }
    }
}

struct CompiledSelectors {
    pagination: Selector,
    page_link: Selector,
    product_card: Selector,
    title: Selector,
    price_box: Selector,
    sale_price: Selector,
    regular_price: Selector,
    amount: Selector,
    thumbnail: Selector,
    image: Selector,
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|_| ParseError::InvalidSelector(selector.to_string()))
}

/// WooCommerce店铺列表解析器
pub struct WooCommerceParser {
    compiled: CompiledSelectors,
    next_class: String,
    lazy_src_attr: String,
    placeholder_suffix: String,
}

impl WooCommerceParser {
    /// 使用默认的WooCommerce选择器
    pub fn new() -> Result<Self, ParseError> {
        Self::with_selectors(ListingSelectors::default())
    }

    /// 使用自定义选择器
    pub fn with_selectors(selectors: ListingSelectors) -> Result<Self, ParseError> {
        let compiled = CompiledSelectors {
            pagination: compile(&selectors.pagination)?,
            page_link: compile(&selectors.page_link)?,
            product_card: compile(&selectors.product_card)?,
            title: compile(&selectors.title)?,
            price_box: compile(&selectors.price_box)?,
            sale_price: compile(&selectors.sale_price)?,
            regular_price: compile(&selectors.regular_price)?,
            amount: compile(&selectors.amount)?,
            thumbnail: compile(&selectors.thumbnail)?,
            image: compile(&selectors.image)?,
        };

        Ok(Self {
            compiled,
            next_class: selectors.next_class,
            lazy_src_attr: selectors.lazy_src_attr,
            placeholder_suffix: selectors.placeholder_suffix,
        })
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Result<RawProduct, ParseError> {
        let s = &self.compiled;

        let title = card
            .select(&s.title)
            .next()
            .map(|a| text_of(&a))
            .filter(|t| !t.is_empty())
            .ok_or(ParseError::MissingTitle)?;

        let price_box = card
            .select(&s.price_box)
            .next()
            .ok_or(ParseError::MissingPrice)?;
        let price_node = price_box
            .select(&s.sale_price)
            .next()
            .or_else(|| price_box.select(&s.regular_price).next())
            .ok_or(ParseError::MissingPrice)?;
        let amount = price_node
            .select(&s.amount)
            .next()
            .ok_or(ParseError::MissingPrice)?;
        let price = parse_price(&text_of(&amount))?;

        let image = card
            .select(&s.thumbnail)
            .next()
            .and_then(|thumb| thumb.select(&s.image).next())
            .ok_or(ParseError::MissingImage)?;
        let image_url = image
            .value()
            .attr(&self.lazy_src_attr)
            .filter(|v| !v.is_empty())
            .or_else(|| image.value().attr("src"))
            .filter(|v| !v.is_empty())
            .ok_or(ParseError::MissingImage)?;
        if image_url.ends_with(&self.placeholder_suffix) {
            return Err(ParseError::PlaceholderImage(image_url.to_string()));
        }

        Ok(RawProduct {
            title,
            price,
            image_url: image_url.to_string(),
        })
    }
}

impl ListingParser for WooCommerceParser {
    fn total_pages(&self, html: &str) -> u32 {
        let document = Html::parse_document(html);

        let Some(pagination) = document.select(&self.compiled.pagination).next() else {
            warn!("No pagination found, defaulting to 1 page");
            return 1;
        };

        let max_page = pagination
            .select(&self.compiled.page_link)
            .filter(|link| !link.value().classes().any(|c| c == self.next_class))
            .filter_map(|link| text_of(&link).parse::<u32>().ok())
            .fold(1, u32::max);

        info!("Total pages found: {}", max_page);
        max_page
    }

    fn parse_products(&self, html: &str) -> Vec<RawProduct> {
        let document = Html::parse_document(html);
        let cards: Vec<ElementRef<'_>> = document.select(&self.compiled.product_card).collect();
        debug!("Found {} product elements", cards.len());

        let mut products = Vec::with_capacity(cards.len());
        for card in cards {
            match self.parse_card(card) {
                Ok(product) => products.push(product),
                Err(err @ ParseError::InvalidPrice(_)) => {
                    counter!("pricewatch_products_skipped_total").increment(1);
                    warn!("Error processing product: {}", err);
                }
                Err(err) => {
                    counter!("pricewatch_products_skipped_total").increment(1);
                    debug!("Skipping product card: {}", err);
                }
            }
        }
        products
    }
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 解析价格文本
///
/// 去掉货币符号、千位分隔符和结尾的 `/-` 后按精确十进制解析，
/// 例如 `"₹1,234/-"` 得到 `1234`
pub fn parse_price(text: &str) -> Result<Decimal, ParseError> {
    let cleaned = text
        .replace('₹', "")
        .replace(',', "")
        .replace("/-", "");
    let cleaned = cleaned.trim();

    let price =
        Decimal::from_str(cleaned).map_err(|_| ParseError::InvalidPrice(text.to_string()))?;
    if price.is_sign_negative() {
        return Err(ParseError::InvalidPrice(text.to_string()));
    }
    Ok(price)
}

#[cfg(test)]
#[path = "listing_parser_test.rs"]
mod tests;
