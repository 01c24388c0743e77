//! Shared test documents.

/// Reference year the sample resume is measured against.
pub const SAMPLE_YEAR: i32 = 2025;

pub const SAMPLE_RESUME: &str = "\
JANE DOE
Senior Data Engineer | jane@example.com

SUMMARY
Data engineer with 7 years building batch and streaming platforms.

PROFESSIONAL EXPERIENCE
Senior Data Engineer, Acme Analytics, 2021 - Present
Built Spark and Kafka pipelines on AWS processing 2TB per day.
Orchestrated workflows with Airflow and dbt; mentored 3 engineers.
Data Engineer, Globex, 2018 - 2021
Developed Python ETL jobs and SQL models in PostgreSQL.
Deployed services with Docker and Kubernetes.

EDUCATION
Bachelor's degree in Computer Science, State University, 2017

SKILLS
Python, SQL, Spark, Kafka, Airflow, AWS, Docker, Git
";

pub const SAMPLE_JD: &str = "\
Senior Data Engineer
We are hiring a data engineer to build our analytics platform.
Requirements:
- 5+ years of experience with Python and SQL
- Must have hands-on Apache Spark and Kafka experience
- Experience with Airflow required
Preferred qualifications:
- AWS or GCP experience is a plus
- Familiarity with Docker and Kubernetes
Bachelor's degree in Computer Science or related field.
";
