//! Initial catalog data, loaded into a fresh store on first startup.

use chrono::Utc;
use lustre_core::{BannerId, CategoryId, NewsId, ProductId};

use crate::db::CatalogRepository;
use crate::models::{Banner, Category, News, Product};
use crate::store::{Store, StoreError};

struct ProductSeed {
    id: i64,
    name: &'static str,
    price: f64,
    short_description: &'static str,
    long_description: &'static str,
    sku: &'static str,
    discount: i64,
    images: &'static [&'static str],
    category_id: i64,
}

const CATEGORIES: &[(i64, &str, &str)] = &[
    (1, "Earrings", "earrings"),
    (2, "Rings", "rings"),
    (3, "Necklaces", "necklaces"),
    (4, "Bracelets", "bracelets"),
];

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: 1,
        name: "Lira Earrings",
        price: 1540.0,
        short_description: "Elegant golden hoop earrings",
        long_description: "A pair that fits any wardrobe. High-purity gold \
                           whose finish speaks for itself.",
        sku: "12",
        discount: 0,
        images: &[
            "/images/jewelry/liras1.jpg",
            "/images/jewelry/liras2.jpg",
            "/images/jewelry/liras3.jpg",
            "/images/jewelry/liras4.jpg",
        ],
        category_id: 1,
    },
    ProductSeed {
        id: 2,
        name: "Stella Diamond Clock",
        price: 92400.0,
        short_description: "Elegant gold wristwatch for women, pairing fine \
                            jewelry craft with a precise movement",
        long_description: "More than an instrument for telling time, this \
                           watch is a full jewelry piece. The gold case and \
                           bracelet give it a luxurious look and lasting \
                           durability, and the restrained dial works equally \
                           well with daytime and evening outfits.",
        sku: "CLOCK-STELLA-001",
        discount: 10,
        images: &[
            "/images/jewelry/clock1.jpg",
            "/images/jewelry/clock2.jpg",
            "/images/jewelry/clock3.jpg",
            "/images/jewelry/clock4.jpg",
        ],
        category_id: 4,
    },
    ProductSeed {
        id: 3,
        name: "Moonlight Necklace",
        price: 34650.0,
        short_description: "Delicate necklace with a moonstone",
        long_description: "A refined sterling silver necklace set with a \
                           natural moonstone. Understated and a little \
                           mysterious.",
        sku: "NECK-MOON-001",
        discount: 15,
        images: &[
            "/images/jewelry/moonlighto1.jpg",
            "/images/jewelry/moonlighto2.jpg",
            "/images/jewelry/moonlighto3.jpg",
        ],
        category_id: 3,
    },
    ProductSeed {
        id: 4,
        name: "Rose Gold Bracelet",
        price: 52360.0,
        short_description: "Bracelet in rose gold",
        long_description: "An elegant 18k rose gold bracelet with a fine \
                           weave. The perfect finish for an evening look.",
        sku: "BRACE-ROSE-001",
        discount: 0,
        images: &[
            "/images/jewelry/pink1.jpg",
            "/images/jewelry/pink2.jpg",
            "/images/jewelry/pink3.jpg",
        ],
        category_id: 4,
    },
    ProductSeed {
        id: 5,
        name: "Crystal Drop Earrings",
        price: 6545.0,
        short_description: "Drop earrings with Swarovski crystals",
        long_description: "Striking earrings with Swarovski crystals in a \
                           rhodium-plated silver setting. Instant sparkle \
                           for any evening outfit.",
        sku: "EARR-CRYSTAL-001",
        discount: 20,
        images: &["/images/jewelry/crystals1.jpg"],
        category_id: 1,
    },
    ProductSeed {
        id: 6,
        name: "Vintage Pearl Necklace",
        price: 24640.0,
        short_description: "Vintage freshwater pearl necklace",
        long_description: "A classic necklace of natural freshwater pearls \
                           with a gold-plated clasp. Timeless elegance.",
        sku: "NECK-PEARL-001",
        discount: 0,
        images: &[
            "/images/jewelry/vint1.jpg",
            "/images/jewelry/vint2.jpg",
            "/images/jewelry/vint3.jpg",
        ],
        category_id: 3,
    },
    ProductSeed {
        id: 7,
        name: "Infinity Ring Set",
        price: 11550.0,
        short_description: "Infinity ring trio",
        long_description: "A stylish set of three rings in graduated sizes, \
                           each carrying the infinity symbol. Sterling \
                           silver with a rhodium finish.",
        sku: "RING-INF-SET",
        discount: 25,
        images: &["/images/jewelry/rings1.jpg", "/images/jewelry/rings2.jpg"],
        category_id: 2,
    },
    ProductSeed {
        id: 8,
        name: "Charm Bracelet",
        price: 7315.0,
        short_description: "Silver bracelet with charm pendants",
        long_description: "A playful silver bracelet with a collection of \
                           miniature charms: a heart, a star, a moon and a \
                           sun. A great gift.",
        sku: "BRACE-CHARM-001",
        discount: 0,
        images: &["/images/jewelry/sharm1.jpg"],
        category_id: 4,
    },
];

/// Seed the catalog into an empty store.
///
/// # Errors
///
/// Returns [`StoreError`] when the store cannot be written.
pub fn seed(store: &Store) -> Result<(), StoreError> {
    let catalog = CatalogRepository::new(store);
    let now = Utc::now();

    let categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|&(id, name, alias)| Category {
            id: CategoryId::new(id),
            name: name.to_owned(),
            alias: alias.to_owned(),
        })
        .collect();
    catalog.set_categories(&categories)?;

    let products: Vec<Product> = PRODUCTS
        .iter()
        .map(|p| Product {
            id: ProductId::new(p.id),
            name: p.name.to_owned(),
            price: p.price,
            short_description: p.short_description.to_owned(),
            long_description: p.long_description.to_owned(),
            sku: p.sku.to_owned(),
            discount: p.discount,
            images: p.images.iter().map(|&i| i.to_owned()).collect(),
            category_id: CategoryId::new(p.category_id),
            category: None,
            created_at: now,
            updated_at: now,
        })
        .collect();
    catalog.set_products(&products)?;

    let banners: Vec<Banner> = [(1, 2, "/images/banners/stella.jpg"), (2, 3, "/images/banners/moonlight.jpg"), (3, 7, "/images/banners/infinity.jpg")]
        .iter()
        .map(|&(id, product_id, image)| Banner {
            id: BannerId::new(id),
            product_id: ProductId::new(product_id),
            image: image.to_owned(),
            position: id,
            product: None,
        })
        .collect();
    catalog.set_banners(&banners)?;

    let news = vec![
        News {
            id: NewsId::new(1),
            title: "Autumn collection is here".to_owned(),
            description: "Moonstone, pearls and rose gold - the new arrivals \
                          for the season are in the catalog."
                .to_owned(),
            image: "/images/news/autumn.jpg".to_owned(),
            created_at: now,
        },
        News {
            id: NewsId::new(2),
            title: "Up to 25% off selected rings".to_owned(),
            description: "The Infinity set and more, discounted while stock \
                          lasts."
                .to_owned(),
            image: "/images/news/sale.jpg".to_owned(),
            created_at: now,
        },
    ];
    catalog.set_news(&news)?;

    Ok(())
}
