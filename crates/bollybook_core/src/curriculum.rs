//! The fixed book curriculum.

use serde::Serialize;

/// Heading printed at the top of every rendered book.
pub const BOOK_TITLE: &str = "Bollywood Cloud Computing Book";

/// One planned chapter: its number, title and page target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChapterPlan {
    /// 1-based position in the book
    pub number: u32,
    /// Chapter title as sent to the model
    pub title: &'static str,
    /// Approximate number of comic pages requested
    pub target_pages: u32,
}

const fn plan(number: u32, title: &'static str, target_pages: u32) -> ChapterPlan {
    ChapterPlan {
        number,
        title,
        target_pages,
    }
}

/// The thirteen chapters every full book is generated from, in order.
pub static CURRICULUM: [ChapterPlan; 13] = [
    plan(1, "Introduction to Cloud Computing", 5),
    plan(2, "Virtualization Magic", 4),
    plan(3, "Virtual Machines - The Copy Machine", 4),
    plan(4, "Containers: Docker Ka Jadoo", 5),
    plan(5, "Service Models: IaaS, PaaS, SaaS", 5),
    plan(6, "Deployment Models", 4),
    plan(7, "Cloud Storage", 4),
    plan(8, "Cloud Networking", 4),
    plan(9, "Load Balancing & Auto-Scaling", 5),
    plan(10, "Cloud Security", 5),
    plan(11, "Serverless Computing", 4),
    plan(12, "Cloud Providers (AWS, Azure, GCP)", 6),
    plan(13, "Real-World Case Studies", 5),
];

/// Base syllabus topics listed in the table-of-contents prompt.
pub static SYLLABUS: [&str; 17] = [
    "Introduction to Cloud Computing",
    "Virtualization & Hypervisors",
    "Virtual Machines",
    "Containers & Docker",
    "Service Models (IaaS, PaaS, SaaS)",
    "Deployment Models",
    "Cloud Storage",
    "Cloud Networking",
    "Load Balancing",
    "Auto-Scaling & Elasticity",
    "Cloud Security",
    "Fault Tolerance & Disaster Recovery",
    "Serverless Computing",
    "Edge & Fog Computing",
    "Cloud Providers (AWS, Azure, GCP)",
    "Real-world Case Studies",
    "Pricing & SLAs",
];
