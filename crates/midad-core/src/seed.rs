//! The built-in seed catalog
//!
//! The posts the blog ships with, embedded in code and immutable through
//! normal CRUD. The catalog is nested by category then by slug, matching
//! the public site's `/:categorySlug/:postSlug` routing; queries flatten
//! it in declaration order.
//!
//! Also home to the fixed default category list, so navigation stays
//! stable even when a category has no posts.

use crate::models::{Category, Post};

/// The fixed category set: `(slug, display name, description)`
const DEFAULT_CATEGORIES: [(&str, &str, &str); 5] = [
    (
        "ai",
        "الذكاء الاصطناعي",
        "استكشاف أحدث تطورات الذكاء الاصطناعي وتطبيقاته في مختلف المجالات وتأثيره على مستقبل البشرية.",
    ),
    (
        "e-learning",
        "التعليم الإلكتروني",
        "نظرة معمقة حول منصات وأساليب التعليم الإلكتروني الحديثة والتعلم الذاتي في العصر الرقمي.",
    ),
    (
        "business",
        "إدارة الأعمال",
        "استراتيجيات وأفكار في إدارة الأعمال والقيادة والإنتاجية لبناء مشاريع ناجحة ومستدامة.",
    ),
    (
        "humanities",
        "إنسانيات",
        "تأملات وأفكار في مجالات الفلسفة والأدب والفن والتاريخ وعلاقتها بالحياة المعاصرة.",
    ),
    (
        "misc",
        "تدوينات متفرقة",
        "تدوينات متنوعة في مواضيع مختلفة تعكس اهتمامات وأفكار شخصية لا تندرج تحت الأقسام الأخرى.",
    ),
];

/// The fixed default category list, in navigation order
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(slug, name, _)| Category::new(*slug, *name))
        .collect()
}

/// Description shown on a category landing page
pub fn category_description(slug: &str) -> Option<&'static str> {
    DEFAULT_CATEGORIES
        .iter()
        .find(|(s, _, _)| *s == slug)
        .map(|(_, _, desc)| *desc)
}

/// The immutable, code-embedded set of posts shipped with the blog
#[derive(Debug, Clone)]
pub struct SeedCatalog {
    posts: Vec<Post>,
}

impl SeedCatalog {
    /// The catalog the blog ships with
    pub fn builtin() -> Self {
        Self {
            posts: builtin_posts(),
        }
    }

    /// An empty catalog (store-only operation, useful in tests)
    pub fn empty() -> Self {
        Self { posts: Vec::new() }
    }

    /// A catalog from explicit posts, in declaration order
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Seed posts in declaration order (category by category)
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Whether an id originates in the seed catalog
    pub fn contains(&self, id: &str) -> bool {
        self.posts.iter().any(|p| p.id == id)
    }

    /// Look up a seed post by id
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}

fn seed_post(
    id: &str,
    title: &str,
    excerpt: &str,
    date: &str,
    category_slug: &str,
    slug: &str,
    cover_image: &str,
    tags: &[&str],
) -> Post {
    let category = DEFAULT_CATEGORIES
        .iter()
        .find(|(s, _, _)| *s == category_slug)
        .map(|(_, name, _)| *name)
        .unwrap_or(category_slug);
    Post {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: None,
        date: date.to_string(),
        category: category.to_string(),
        category_slug: category_slug.to_string(),
        slug: slug.to_string(),
        cover_image: cover_image.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        html_file: None,
    }
}

fn builtin_posts() -> Vec<Post> {
    vec![
        seed_post(
            "1",
            "كيف سيغير الذكاء الاصطناعي مستقبل العمل؟",
            "نظرة تحليلية لتأثير تقنيات الذكاء الاصطناعي على سوق العمل والمهارات المطلوبة في المستقبل القريب.",
            "10 مايو 2025",
            "ai",
            "ai-future-of-work",
            "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?auto=format&fit=crop&w=800&q=80",
            &["ذكاء-اصطناعي", "مستقبل-العمل", "تكنولوجيا"],
        ),
        seed_post(
            "6",
            "تقييم نماذج الذكاء الاصطناعي التوليدي",
            "مقارنة بين أحدث نماذج الذكاء الاصطناعي التوليدي وتطبيقاتها العملية في مختلف المجالات.",
            "20 أبريل 2025",
            "ai",
            "evaluating-generative-ai",
            "https://images.unsplash.com/photo-1649972904349-6e44c42644a7?auto=format&fit=crop&w=800&q=80",
            &["ذكاء-اصطناعي", "تعلم-آلي", "تقنية"],
        ),
        seed_post(
            "10",
            "أخلاقيات الذكاء الاصطناعي",
            "مناقشة القضايا الأخلاقية المتعلقة بتطوير واستخدام تقنيات الذكاء الاصطناعي وكيفية معالجتها.",
            "5 أبريل 2025",
            "ai",
            "ai-ethics",
            "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?auto=format&fit=crop&w=800&q=80",
            &["أخلاقيات", "ذكاء-اصطناعي", "تكنولوجيا"],
        ),
        seed_post(
            "2",
            "أفضل منصات التعلم الإلكتروني في 2025",
            "مراجعة شاملة لأهم منصات التعليم الإلكتروني وكيفية اختيار المنصة المناسبة لاحتياجاتك التعليمية.",
            "5 مايو 2025",
            "e-learning",
            "best-elearning-platforms-2025",
            "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?auto=format&fit=crop&w=800&q=80",
            &["تعليم-إلكتروني", "منصات-تعليمية", "تعلم-ذاتي"],
        ),
        seed_post(
            "7",
            "مهارات القرن الـ21 في التعليم الحديث",
            "استكشاف المهارات الضرورية التي يجب تنميتها لدى الطلاب للنجاح في عالم متغير بسرعة.",
            "15 أبريل 2025",
            "e-learning",
            "21st-century-skills",
            "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=800&q=80",
            &["مهارات-القرن-21", "تعليم", "تطوير-ذاتي"],
        ),
        seed_post(
            "3",
            "استراتيجيات إدارة الوقت للمدراء التنفيذيين",
            "أساليب عملية وتقنيات فعالة لإدارة الوقت بشكل أفضل وزيادة الإنتاجية في المناصب القيادية.",
            "1 مايو 2025",
            "business",
            "time-management-executives",
            "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?auto=format&fit=crop&w=800&q=80",
            &["إدارة-الوقت", "إنتاجية", "قيادة"],
        ),
        seed_post(
            "8",
            "الاستدامة في إدارة الأعمال",
            "كيفية دمج ممارسات الاستدامة في استراتيجيات الشركات وتأثيرها على الأداء المالي طويل المدى.",
            "12 أبريل 2025",
            "business",
            "sustainability-business-management",
            "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?auto=format&fit=crop&w=800&q=80",
            &["استدامة", "إدارة-أعمال", "مسؤولية-اجتماعية"],
        ),
        seed_post(
            "4",
            "التعاطف في عصر الرقمنة",
            "كيف يمكننا الحفاظ على قيم التعاطف والإنسانية في عالم يزداد اعتماداً على التكنولوجيا والتواصل الافتراضي.",
            "29 أبريل 2025",
            "humanities",
            "empathy-digital-age",
            "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05?auto=format&fit=crop&w=800&q=80",
            &["إنسانية", "تعاطف", "تكنولوجيا"],
        ),
        seed_post(
            "9",
            "دور الأدب في تشكيل الوعي الإنساني",
            "نظرة تحليلية لتأثير الأدب على فهمنا للعالم والذات والآخر عبر العصور المختلفة.",
            "8 أبريل 2025",
            "humanities",
            "literature-human-consciousness",
            "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?auto=format&fit=crop&w=800&q=80",
            &["أدب", "وعي", "ثقافة"],
        ),
        seed_post(
            "5",
            "رحلتي مع الكتابة: قصة شغف",
            "تجربة شخصية في عالم الكتابة والتدوين، والدروس المستفادة خلال رحلة خمس سنوات من النشر المستمر.",
            "25 أبريل 2025",
            "misc",
            "writing-journey",
            "https://images.unsplash.com/photo-1500673922987-e212871fec22?auto=format&fit=crop&w=800&q=80",
            &["كتابة", "تجارب-شخصية", "إلهام"],
        ),
    ]
}
