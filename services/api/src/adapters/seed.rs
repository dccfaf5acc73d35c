//! services/api/src/adapters/seed.rs
//!
//! Sample directory entries and blog posts loaded into a fresh store.

use chrono::{DateTime, NaiveDate, Utc};
use legal_assistant_core::domain::{NewBlogPost, NewLawyer};

fn languages(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn lawyers() -> Vec<NewLawyer> {
    vec![
        NewLawyer {
            name: "Advocate Rajesh Kumar".to_string(),
            email: "rajesh.kumar@legalai.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            specialization: "Corporate & Commercial Law".to_string(),
            location: "Mumbai, Maharashtra".to_string(),
            experience: 12,
            rating: 48,
            review_count: 127,
            bio: Some("Experienced corporate lawyer with expertise in mergers, acquisitions, and commercial litigation.".to_string()),
            languages: languages(&["English", "Hindi", "Marathi"]),
            verified: true,
        },
        NewLawyer {
            name: "Advocate Priya Sharma".to_string(),
            email: "priya.sharma@legalai.com".to_string(),
            phone: "+91 98765 43211".to_string(),
            specialization: "Family & Matrimonial Law".to_string(),
            location: "Delhi, India".to_string(),
            experience: 8,
            rating: 49,
            review_count: 89,
            bio: Some("Specialist in family law matters including divorce, custody, and matrimonial disputes.".to_string()),
            languages: languages(&["English", "Hindi", "Punjabi"]),
            verified: true,
        },
        NewLawyer {
            name: "Advocate Arun Mehta".to_string(),
            email: "arun.mehta@legalai.com".to_string(),
            phone: "+91 98765 43212".to_string(),
            specialization: "Criminal & Constitutional Law".to_string(),
            location: "Bangalore, Karnataka".to_string(),
            experience: 15,
            rating: 47,
            review_count: 203,
            bio: Some("Senior advocate specializing in criminal defense and constitutional matters.".to_string()),
            languages: languages(&["English", "Hindi", "Kannada"]),
            verified: true,
        },
    ]
}

pub fn blog_posts() -> Vec<NewBlogPost> {
    vec![
        NewBlogPost {
            title: "New Digital Privacy Laws: What Indian Businesses Need to Know".to_string(),
            slug: "digital-privacy-laws-indian-businesses".to_string(),
            excerpt: "The recently passed Digital Personal Data Protection Act 2023 brings significant changes to how businesses handle customer data.".to_string(),
            content: "The Digital Personal Data Protection Act 2023 represents a landmark shift in India's approach to data privacy...".to_string(),
            author: "Dr. Kavita Jain".to_string(),
            author_role: "Senior Legal Analyst".to_string(),
            category: "Data Privacy".to_string(),
            featured: true,
            published_at: date(2024, 11, 15),
        },
        NewBlogPost {
            title: "Supreme Court Ruling on Property Rights: Key Takeaways".to_string(),
            slug: "supreme-court-property-rights-ruling".to_string(),
            excerpt: "Recent landmark judgment clarifies several aspects of property ownership and transfer procedures.".to_string(),
            content: "The Supreme Court's recent judgment on property rights has clarified several important aspects...".to_string(),
            author: "Advocate Suresh Patel".to_string(),
            author_role: "Property Law Expert".to_string(),
            category: "Property Law".to_string(),
            featured: false,
            published_at: date(2024, 11, 12),
        },
        NewBlogPost {
            title: "GST Updates: New Compliance Requirements for Small Businesses".to_string(),
            slug: "gst-updates-small-businesses".to_string(),
            excerpt: "The latest GST amendments introduce new filing requirements that small business owners should be aware of.".to_string(),
            content: "Recent amendments to the GST framework have introduced several new compliance requirements...".to_string(),
            author: "CA Meera Singh".to_string(),
            author_role: "Tax Consultant".to_string(),
            category: "Tax Law".to_string(),
            featured: false,
            published_at: date(2024, 11, 10),
        },
    ]
}
