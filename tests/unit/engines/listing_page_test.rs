// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use pricewatch::engines::listing_parser::{ListingParser, WooCommerceParser};
use rust_decimal_macros::dec;

/// 接近真实店铺的列表页片段
const SHOP_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en-US">
<head><meta charset="UTF-8"><title>Shop – Dental Stall</title></head>
<body class="archive post-type-archive post-type-archive-product woocommerce">
<ul class="products columns-5">
  <li class="product type-product post-1 status-publish first instock product_cat-instruments has-post-thumbnail sale shipping-taxable purchasable product-type-simple">
    <div class="product-inner clearfix">
      <div class="mf-product-thumbnail">
        <a href="https://shop.test/product/curette/">
          <img width="300" height="300" src="data:image/svg+xml,%3Csvg%20xmlns='http://www.w3.org/2000/svg'%3E%3C/svg%3E" class="attachment-shop_catalog" alt="" data-lazy-src="https://shop.test/wp-content/uploads/curette-300x300.jpg" />
        </a>
      </div>
      <div class="mf-product-details">
        <div class="mf-product-content">
          <h2 class="woo-loop-product__title"><a href="https://shop.test/product/curette/">Gracey Curette  Set of 7</a></h2>
        </div>
        <div class="mf-product-price-box">
          <span class="price">
            <del aria-hidden="true"><span class="woocommerce-Price-amount amount"><bdi><span class="woocommerce-Price-currencySymbol">&#8377;</span>2,450.00</bdi></span></del>
            <ins><span class="woocommerce-Price-amount amount"><bdi><span class="woocommerce-Price-currencySymbol">&#8377;</span>1,999.50</bdi></span></ins>
          </span>
        </div>
      </div>
    </div>
  </li>
  <li class="product type-product post-2 status-publish instock">
    <div class="product-inner clearfix">
      <div class="mf-product-thumbnail">
        <a href="https://shop.test/product/mirror/">
          <img src="https://shop.test/wp-content/uploads/mirror.jpg" alt="" />
        </a>
      </div>
      <div class="mf-product-details">
        <h2 class="woo-loop-product__title"><a href="https://shop.test/product/mirror/">Mouth Mirror</a></h2>
        <div class="mf-product-price-box">
          <span class="price"><span class="woocommerce-Price-amount amount"><bdi><span class="woocommerce-Price-currencySymbol">&#8377;</span>85/-</bdi></span></span>
        </div>
      </div>
    </div>
  </li>
  <li class="product type-product post-3 status-publish outofstock">
    <div class="product-inner clearfix">
      <div class="mf-product-thumbnail"><a href="https://shop.test/product/call/"><img src="https://shop.test/wp-content/uploads/call.jpg" /></a></div>
      <div class="mf-product-details">
        <h2 class="woo-loop-product__title"><a href="https://shop.test/product/call/">Autoclave</a></h2>
        <div class="mf-product-price-box"><span class="price">Call for price</span></div>
      </div>
    </div>
  </li>
</ul>
<nav class="woocommerce-pagination">
  <ul class="page-numbers">
    <li><span aria-current="page" class="page-numbers current">1</span></li>
    <li><a class="page-numbers" href="https://shop.test/shop/page/2/">2</a></li>
    <li><a class="page-numbers" href="https://shop.test/shop/page/3/">3</a></li>
    <li><span class="page-numbers dots">&hellip;</span></li>
    <li><a class="page-numbers" href="https://shop.test/shop/page/42/">42</a></li>
    <li><a class="next page-numbers" href="https://shop.test/shop/page/2/">&rarr;</a></li>
  </ul>
</nav>
</body>
</html>"#;

#[test]
fn test_realistic_listing_page() {
    let parser = WooCommerceParser::new().unwrap();

    assert_eq!(parser.total_pages(SHOP_PAGE), 42);

    let products = parser.parse_products(SHOP_PAGE);
    assert_eq!(products.len(), 2);

    assert_eq!(products[0].title, "Gracey Curette  Set of 7");
    assert_eq!(products[0].price, dec!(1999.50));
    assert_eq!(
        products[0].image_url,
        "https://shop.test/wp-content/uploads/curette-300x300.jpg"
    );

    assert_eq!(products[1].title, "Mouth Mirror");
    assert_eq!(products[1].price, dec!(85));
    assert_eq!(
        products[1].image_url,
        "https://shop.test/wp-content/uploads/mirror.jpg"
    );
}
