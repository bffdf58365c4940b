use serde_json::json;

use crate::block::BlockFieldDefinition;
use crate::field::{FieldDefinition, FieldType, SelectOption};

fn field(name: &str, label: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition::new(name, label, field_type)
}

fn localized(name: &str, label: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition::new(name, label, field_type).bilingual()
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}

fn section_heading() -> [FieldDefinition; 2] {
    [
        localized("title", "Section Title", FieldType::Text),
        localized("subtitle", "Section Subtitle", FieldType::Text),
    ]
}

pub(super) fn block_catalog() -> Vec<BlockFieldDefinition> {
    vec![
        hero_banner(),
        about_section(),
        services_showcase(),
        portfolio_display_home(),
        contact_form(),
        stats_section(),
        process_section(),
        animated_headline(),
        text_content(),
        awards_section(),
        featured_in(),
        clients_section(),
        blog_section(),
        instagram_section(),
        separator(),
        company_description_home(),
        dynamic_form(),
    ]
}

fn hero_banner() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "hero_banner",
        "Hero Banner",
        "Headers",
        "🏔️",
        vec![
            localized("title", "Title", FieldType::Text)
                .required()
                .placeholder("Enter main heading"),
            localized("subtitle", "Subtitle", FieldType::Textarea)
                .placeholder("Enter subheading text"),
            field("backgroundImage", "Background Image", FieldType::Image)
                .help_text("Recommended size: 1920x1080px"),
            field("backgroundVideo", "Background Video URL", FieldType::Url)
                .placeholder("https://example.com/video.mp4"),
            localized("ctaText", "CTA Button Text", FieldType::Text)
                .placeholder("e.g., Explore Our Work"),
            field("ctaLink", "CTA Button Link", FieldType::Url).placeholder("/portfolio"),
            field("maskLayer", "Show Dark Overlay", FieldType::Boolean).default_value(json!(true)),
            field("projectsLinkImage", "Projects Link Image", FieldType::Image),
            localized("projectsLinkText", "Projects Link Text", FieldType::Text)
                .default_value(json!("Projects")),
        ],
    )
}

fn about_section() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "about_section",
        "About Section",
        "Content",
        "👥",
        vec![
            localized("title", "Title", FieldType::Text).required(),
            localized("subtitle", "Subtitle", FieldType::Text),
            localized("description", "Description", FieldType::Richtext).required(),
            field("mainImage", "Main Image", FieldType::Image),
            field("gallery", "Image Gallery", FieldType::Gallery)
                .help_text("Add multiple images for carousel"),
            field("yearsOfExperience", "Years of Experience", FieldType::Text)
                .default_value(json!("22")),
            localized("experienceLabel", "Experience Label", FieldType::Text)
                .default_value(json!({"en": "Years of Excellence", "ar": "عاماً من التميز"})),
            field("features", "Features", FieldType::Repeater).repeater_fields(vec![
                localized("title", "Feature Title", FieldType::Text),
                localized("description", "Feature Description", FieldType::Textarea),
                field("icon", "Feature Icon", FieldType::Text).placeholder("e.g., ⭐"),
            ]),
            field("showCta", "Show Call to Action", FieldType::Boolean).default_value(json!(true)),
            localized("ctaText", "CTA Text", FieldType::Text),
            field("ctaLink", "CTA Link", FieldType::Url),
        ],
    )
}

fn services_showcase() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "services_showcase",
        "Services Showcase",
        "Services",
        "🛠️",
        vec![
            title,
            subtitle,
            field("services", "Services", FieldType::Repeater).repeater_fields(vec![
                localized("title", "Service Title", FieldType::Text).required(),
                localized("description", "Service Description", FieldType::Textarea),
                field("image", "Service Image", FieldType::Image).required(),
                field("icon", "Service Icon", FieldType::Text),
                field("link", "Service Link", FieldType::Url),
            ]),
        ],
    )
}

fn portfolio_display_home() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "portfolio_display_home",
        "Portfolio Display",
        "Portfolio",
        "📁",
        vec![
            localized("headline", "Headline", FieldType::Text),
            localized("sectionTitle", "Section Title", FieldType::Text),
            localized("description", "Description", FieldType::Richtext),
            localized("projectCount", "Project Count Text", FieldType::Text)
                .placeholder("e.g., +400 Projects"),
            field("showFeatured", "Show Featured Projects Only", FieldType::Boolean)
                .default_value(json!(true)),
            field("maxItems", "Maximum Projects to Display", FieldType::Number)
                .default_value(json!(6))
                .min(1.0)
                .max(20.0),
            field("category", "Filter by Category", FieldType::Select).options(options(&[
                ("", "All Categories"),
                ("residential", "Residential"),
                ("commercial", "Commercial"),
                ("hotels", "Hotels"),
                ("restaurants", "Restaurants"),
            ])),
            field("showCta", "Show CTA Button", FieldType::Boolean).default_value(json!(true)),
            localized("ctaText", "CTA Text", FieldType::Text),
            field("ctaLink", "CTA Link", FieldType::Url).default_value(json!("/portfolio")),
            localized("projectsLinkText", "Projects Link Text", FieldType::Text),
            field("projectsLink", "Projects Link URL", FieldType::Url),
        ],
    )
}

fn contact_form() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "contact_form",
        "Contact Form",
        "Forms",
        "📧",
        vec![
            localized("title", "Form Title", FieldType::Text).required(),
            localized("subtitle", "Form Subtitle", FieldType::Text),
            localized("description", "Form Description", FieldType::Textarea),
            localized("successMessage", "Success Message", FieldType::Text).default_value(json!({
                "en": "Thank you! We'll be in touch soon.",
                "ar": "شكراً! سنتواصل معك قريباً."
            })),
            localized("errorMessage", "Error Message", FieldType::Text).default_value(json!({
                "en": "Error submitting form. Please try again.",
                "ar": "خطأ في إرسال النموذج. يرجى المحاولة مرة أخرى."
            })),
            field("fields", "Form Fields", FieldType::Repeater).repeater_fields(vec![
                field("fieldName", "Field Name", FieldType::Text).required(),
                localized("label", "Field Label", FieldType::Text).required(),
                localized("placeholder", "Placeholder Text", FieldType::Text),
                field("type", "Field Type", FieldType::Select).options(options(&[
                    ("text", "Text"),
                    ("email", "Email"),
                    ("tel", "Phone"),
                    ("textarea", "Textarea"),
                    ("select", "Dropdown"),
                    ("radio", "Radio Buttons"),
                ])),
                field("required", "Required Field", FieldType::Boolean).default_value(json!(false)),
            ]),
            localized("submitButtonText", "Submit Button Text", FieldType::Text)
                .default_value(json!({"en": "Submit", "ar": "إرسال"})),
            field("recipientEmail", "Recipient Email", FieldType::Email)
                .default_value(json!("info@mouhajerdesign.com")),
        ],
    )
}

fn stats_section() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "stats_section",
        "Statistics Section",
        "Content",
        "📊",
        vec![
            title,
            subtitle,
            field("stats", "Statistics", FieldType::Repeater).repeater_fields(vec![
                field("number", "Number/Value", FieldType::Text)
                    .required()
                    .placeholder("e.g., 500+"),
                localized("label", "Label", FieldType::Text).required(),
                field("icon", "Icon", FieldType::Text).placeholder("e.g., 🏆"),
                localized("description", "Description", FieldType::Textarea),
            ]),
            field("backgroundColor", "Background Color", FieldType::Color)
                .default_value(json!("#F8F9FA")),
        ],
    )
}

fn process_section() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "process_section",
        "Process/How We Work",
        "Content",
        "🔄",
        vec![
            title,
            subtitle,
            field("mainImage", "Main Image", FieldType::Image),
            field("smallImage", "Small/Accent Image", FieldType::Image),
            field("steps", "Process Steps", FieldType::Repeater).repeater_fields(vec![
                field("stepNumber", "Step Number", FieldType::Number).min(1.0),
                localized("title", "Step Title", FieldType::Text).required(),
                localized("description", "Step Description", FieldType::Textarea),
                field("icon", "Step Icon", FieldType::Text),
                field("image", "Step Image", FieldType::Image),
            ]),
        ],
    )
}

fn animated_headline() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "animated_headline",
        "Animated Headline",
        "Decorative",
        "✨",
        vec![
            localized("text", "Headline Text", FieldType::Text).required(),
            field("animationType", "Animation Type", FieldType::Select)
                .options(options(&[
                    ("scroll", "Scrolling Text"),
                    ("fade", "Fade In/Out"),
                    ("slide", "Slide"),
                    ("typewriter", "Typewriter Effect"),
                ]))
                .default_value(json!("scroll")),
            field("speed", "Animation Speed", FieldType::Number)
                .min(1.0)
                .max(10.0)
                .default_value(json!(5)),
            field("blackened", "Dark Background", FieldType::Boolean).default_value(json!(false)),
        ],
    )
}

fn text_content() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "text_content",
        "Text Content/CTA Section",
        "Content",
        "📝",
        vec![
            localized("title", "Title", FieldType::Text).required(),
            localized("subtitle", "Subtitle", FieldType::Text),
            localized("description", "Description/Content", FieldType::Richtext),
            localized("founderName", "Founder/Author Name", FieldType::Text),
            localized("founderTitle", "Founder/Author Title", FieldType::Text),
            field("founderImage", "Founder/Author Image", FieldType::Image),
            field("backgroundImage", "Background Image", FieldType::Image),
            field("alignment", "Text Alignment", FieldType::Select)
                .options(options(&[
                    ("left", "Left"),
                    ("center", "Center"),
                    ("right", "Right"),
                ]))
                .default_value(json!("left")),
        ],
    )
}

fn awards_section() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "awards_section",
        "Awards Section",
        "Recognition",
        "🏆",
        vec![
            title,
            subtitle,
            field("awards", "Awards", FieldType::Repeater).repeater_fields(vec![
                localized("name", "Award Name", FieldType::Text).required(),
                field("year", "Year", FieldType::Text),
                localized("organization", "Awarding Organization", FieldType::Text),
                field("image", "Award Image/Logo", FieldType::Image),
                localized("description", "Description", FieldType::Textarea),
            ]),
            field("useMediaLibrary", "Use Awards from Media Library", FieldType::Boolean)
                .help_text("Use images tagged with \"awards\" from media library"),
        ],
    )
}

fn featured_in() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "featured_in",
        "Featured In/Media Mentions",
        "Recognition",
        "⭐",
        vec![
            title,
            subtitle,
            field("logos", "Media/Company Logos", FieldType::Gallery),
            field("useMediaLibrary", "Use Media Library", FieldType::Boolean)
                .help_text("Use images tagged with \"press\" or \"featured_in\" from media library"),
        ],
    )
}

fn clients_section() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "clients_section",
        "Our Clients",
        "Social Proof",
        "🤝",
        vec![
            title,
            subtitle,
            field("clients", "Client Logos", FieldType::Gallery),
            field("testimonials", "Client Testimonials", FieldType::Repeater).repeater_fields(
                vec![
                    field("clientName", "Client Name", FieldType::Text).required(),
                    field("clientTitle", "Client Title/Company", FieldType::Text),
                    localized("testimonial", "Testimonial Text", FieldType::Textarea),
                    field("clientImage", "Client Photo", FieldType::Image),
                    field("rating", "Rating", FieldType::Number).min(1.0).max(5.0),
                ],
            ),
            field(
                "useMediaLibrary",
                "Use Client Logos from Media Library",
                FieldType::Boolean,
            )
            .help_text("Use images tagged with \"clients\" from media library"),
        ],
    )
}

fn blog_section() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "blog_section",
        "Featured Blogs",
        "Content",
        "📰",
        vec![
            title,
            subtitle,
            field("showFeatured", "Show Featured Posts Only", FieldType::Boolean)
                .default_value(json!(true)),
            field("maxPosts", "Maximum Posts to Display", FieldType::Number)
                .default_value(json!(3))
                .min(1.0)
                .max(12.0),
            field("category", "Filter by Category", FieldType::Select).options(options(&[
                ("", "All Categories"),
                ("design-tips", "Design Tips"),
                ("trends", "Trends"),
                ("case-studies", "Case Studies"),
                ("news", "News"),
            ])),
            localized("ctaText", "View All Button Text", FieldType::Text),
            field("ctaLink", "View All Button Link", FieldType::Url).default_value(json!("/blog")),
        ],
    )
}

fn instagram_section() -> BlockFieldDefinition {
    let [title, subtitle] = section_heading();
    BlockFieldDefinition::new(
        "instagram_section",
        "Instagram Feed",
        "Social",
        "📷",
        vec![
            title,
            subtitle,
            field("username", "Instagram Username", FieldType::Text)
                .default_value(json!("@mouhajerdesign")),
            field("feedType", "Feed Type", FieldType::Select)
                .options(options(&[
                    ("manual", "Manual Selection"),
                    ("latest", "Latest Posts"),
                    ("media-library", "From Media Library"),
                ]))
                .default_value(json!("media-library")),
            field("media", "Instagram Images", FieldType::Gallery)
                .help_text("Upload images if using manual selection"),
            field("maxPosts", "Maximum Posts", FieldType::Number)
                .default_value(json!(9))
                .min(1.0)
                .max(20.0),
            field("profileLink", "Instagram Profile Link", FieldType::Url)
                .default_value(json!("https://instagram.com/mouhajerdesign")),
        ],
    )
}

fn separator() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "separator",
        "Section Separator",
        "Layout",
        "➖",
        vec![
            field("style", "Separator Style", FieldType::Select)
                .options(options(&[
                    ("line", "Simple Line"),
                    ("dots", "Dots"),
                    ("wave", "Wave"),
                    ("custom", "Custom"),
                ]))
                .default_value(json!("line")),
            field("spacing", "Vertical Spacing", FieldType::Select)
                .options(options(&[
                    ("small", "Small"),
                    ("medium", "Medium"),
                    ("large", "Large"),
                ]))
                .default_value(json!("medium")),
            field("color", "Color", FieldType::Color),
        ],
    )
}

fn company_description_home() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "company_description_home",
        "Company Description",
        "Content",
        "🏢",
        vec![
            localized("title", "Title", FieldType::Text),
            localized("subtitle", "Subtitle", FieldType::Text),
            localized("description", "Description", FieldType::Richtext),
            field("yearsOfExperience", "Years of Experience", FieldType::Text)
                .default_value(json!("22")),
            localized("experienceLabel", "Experience Label", FieldType::Text)
                .default_value(json!({"en": "Years of Excellence", "ar": "عاماً من التميز"})),
            field("gallery", "Select Images", FieldType::Gallery).help_text(
                "Select specific images to display. If empty, random images will be shown based on Image Count below.",
            ),
            field(
                "imageCount",
                "Number of Random Images (if no images selected)",
                FieldType::Number,
            )
            .default_value(json!(4))
            .min(1.0)
            .max(20.0)
            .help_text("Used only when no images are selected in the gallery above"),
            field("showCta", "Show Call to Action", FieldType::Boolean).default_value(json!(true)),
            localized("ctaText", "CTA Text", FieldType::Text)
                .default_value(json!({"en": "Get in Touch", "ar": "تواصل معنا"})),
            field("ctaLink", "CTA Link", FieldType::Url).default_value(json!("/contact-us")),
        ],
    )
}

fn dynamic_form() -> BlockFieldDefinition {
    BlockFieldDefinition::new(
        "dynamic_form",
        "Dynamic Form",
        "Forms",
        "📝",
        vec![
            field("formId", "Form", FieldType::Text)
                .required()
                .help_text("Select or enter the Form blueprint instance ID to display"),
            localized("formTitle", "Form Title Override", FieldType::Text).help_text(
                "Optional: Override the form title (leave empty to use form default)",
            ),
            localized("formDescription", "Form Description Override", FieldType::Textarea)
                .help_text(
                    "Optional: Override the form description (leave empty to use form default)",
                ),
            localized(
                "submitButtonText",
                "Submit Button Text Override",
                FieldType::Text,
            )
            .help_text("Optional: Override the submit button text"),
            field("containerStyle", "Container Style", FieldType::Select)
                .options(options(&[
                    ("default", "Default"),
                    ("card", "Card"),
                    ("bordered", "Bordered"),
                    ("minimal", "Minimal"),
                ]))
                .default_value(json!("default")),
            field("showLabels", "Show Field Labels", FieldType::Boolean).default_value(json!(true)),
            field("compactMode", "Compact Mode", FieldType::Boolean)
                .default_value(json!(false))
                .help_text("Reduce spacing for a more compact layout"),
        ],
    )
}
