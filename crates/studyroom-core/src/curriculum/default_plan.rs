//! Built-in two-year AI/ML curriculum used to seed a fresh state.

use chrono::{DateTime, Utc};

use crate::model::{Month, Quarter, Roadmap, WeeklyTask, Week, Year};

fn week(num: u32, name: &str, description: &str, tasks: &[(&str, &str, &str)]) -> Week {
    Week::new(num, name, description).with_tasks(
        tasks
            .iter()
            .map(|(id, name, description)| WeeklyTask::new(*id, *name, *description))
            .collect(),
    )
}

fn python_essentials() -> Month {
    Month::new(1, "Python Essentials", "Master Python for ML").with_weeks(vec![
        week(1, "Setup & Basics", "Environment setup, syntax, OOP concepts", &[
            ("w1_t1", "Install Python & tools", "Set up environment, Jupyter, git"),
            ("w1_t2", "Python basics", "Variables, control flow, functions"),
            ("w1_t3", "OOP fundamentals", "Classes, inheritance, polymorphism"),
        ]),
        week(2, "Libraries & Data", "NumPy, Pandas fundamentals", &[
            ("w2_t1", "NumPy fundamentals", "Arrays, operations, broadcasting"),
            ("w2_t2", "Pandas basics", "DataFrames, indexing, groupby"),
            ("w2_t3", "Data visualization", "Matplotlib, Seaborn basics"),
        ]),
        week(3, "Advanced Python", "Functional programming, testing", &[
            ("w3_t1", "Functional programming", "Lambda, map, filter, comprehensions"),
            ("w3_t2", "Testing & debugging", "Unit tests with pytest"),
            ("w3_t3", "Code quality", "Linting, formatting, documentation"),
        ]),
        week(4, "Python Project", "Small project exercise", &[
            ("w4_t1", "Project planning", "Design simple data tool"),
            ("w4_t2", "Implementation", "Build & test"),
            ("w4_t3", "Documentation", "README, comments, examples"),
        ]),
    ])
}

fn linear_algebra() -> Month {
    Month::new(2, "Linear Algebra", "Mathematical foundation for ML").with_weeks(vec![
        week(1, "Vectors & Matrices", "Core concepts", &[
            ("v1_t1", "Vector operations", "Dot product, norms, angles"),
            ("v1_t2", "Matrix operations", "Multiplication, transpose, rank"),
        ]),
        week(2, "Decompositions", "Eigenvalues, SVD", &[
            ("v2_t1", "Eigenvalues/eigenvectors", "Understanding spectral decomposition"),
            ("v2_t2", "SVD & applications", "Dimensionality reduction"),
        ]),
        week(3, "Advanced Topics", "Norms, distances, projections", &[
            ("v3_t1", "Norms & distances", "L1, L2, Euclidean"),
            ("v3_t2", "Linear transformations", "Projections and rotations"),
        ]),
        week(4, "LA for ML", "Practical applications", &[
            ("v4_t1", "LA in ML", "Covariance, PCA concepts"),
        ]),
    ])
}

fn calculus_and_probability() -> Month {
    Month::new(3, "Calculus & Probability", "Optimization and uncertainty").with_weeks(vec![
        week(1, "Single Variable Calculus", "Derivatives, optimization", &[
            ("c1_t1", "Derivatives", "Limits, definition, rules"),
            ("c1_t2", "Optimization", "Critical points, gradients"),
        ]),
        week(2, "Multivariable Calculus", "Gradients, Hessians", &[
            ("c2_t1", "Partial derivatives", "Multivariable chain rule"),
            ("c2_t2", "Gradient descent", "Gradient descent intuition"),
        ]),
        week(3, "Probability Fundamentals", "Distributions, independence", &[
            ("c3_t1", "Basic probability", "Rules, conditional probability"),
            ("c3_t2", "Distributions", "Normal, exponential, Poisson"),
        ]),
        week(4, "Statistics Essentials", "Hypothesis testing, estimation", &[
            ("c4_t1", "Descriptive statistics", "Mean, variance, correlation"),
            ("c4_t2", "Inference basics", "Hypothesis testing concepts"),
        ]),
    ])
}

fn regression_and_linear_models() -> Month {
    Month::new(1, "Regression & Linear Models", "Linear & logistic regression").with_weeks(vec![
        week(1, "Linear Regression", "Theory and practice", &[
            ("lr1", "Linear regression theory", "OLS, assumptions, diagnostics"),
            ("lr2", "Scikit-learn usage", "Fit, predict, evaluate"),
            ("lr3", "Regularization", "Ridge, Lasso, ElasticNet"),
        ]),
        week(2, "Logistic Regression", "Binary and multiclass", &[
            ("log1", "Logistic regression", "Sigmoid, cross-entropy loss"),
            ("log2", "Binary classification", "Decision boundaries"),
            ("log3", "Multiclass methods", "One-vs-Rest, multinomial"),
        ]),
        week(3, "Feature Engineering", "Preprocessing and selection", &[
            ("fe1", "Feature scaling", "Normalization, standardization"),
            ("fe2", "Feature selection", "Univariate, recursive, model-based"),
            ("fe3", "Handling missing data", "Imputation strategies"),
        ]),
        week(4, "Evaluation Metrics", "Measuring model performance", &[
            ("em1", "Regression metrics", "MSE, R², MAE"),
            ("em2", "Classification metrics", "Accuracy, precision, recall, F1, AUC"),
        ]),
    ])
}

fn foundations_year() -> Year {
    Year::new(
        1,
        "Year 1: AI/ML Foundations",
        "Master fundamentals: Python, Math, Classical ML, Basic Deep Learning",
    )
    .with_focus([
        "Python Programming",
        "Mathematics for ML",
        "Classical ML",
        "Deep Learning Basics",
        "Portfolio Start",
    ])
    .with_quarters(vec![
        Quarter::new(1, "Q1: Python & Math Foundations", "Build solid programming and mathematical foundation")
            .with_focus(["Python", "Linear Algebra", "Calculus", "Probability & Statistics"])
            .with_months(vec![python_essentials(), linear_algebra(), calculus_and_probability()]),
        Quarter::new(2, "Q2: Classical ML Fundamentals", "Regression, classification, and evaluation")
            .with_focus(["Regression", "Classification", "Evaluation Metrics", "Feature Engineering"])
            .with_months(vec![regression_and_linear_models()]),
        Quarter::new(3, "Q3: Advanced Classical ML", "Tree-based methods, ensembles, clustering")
            .with_focus(["Decision Trees", "Ensemble Methods", "Clustering", "Dimensionality Reduction"]),
        Quarter::new(4, "Q4: Deep Learning Basics & Portfolio", "Neural networks and first major project")
            .with_focus(["Neural Network Basics", "CNNs", "RNNs", "First Portfolio Project"]),
    ])
}

fn specialization_year() -> Year {
    Year::new(
        2,
        "Year 2: Advanced AI/ML & Specialization",
        "LLMs, GenAI, MLOps, System Design, Specialization",
    )
    .with_focus([
        "Transformers & LLMs",
        "MLOps & Deployment",
        "System Design",
        "Specialization Domains",
        "Advanced Portfolio",
    ])
    .with_quarters(vec![
        Quarter::new(1, "Q1: Transformers & LLMs", "Attention, transformers, and large language models")
            .with_focus(["Attention Mechanism", "Transformer Architecture", "Pre-trained LLMs", "Fine-tuning"]),
        Quarter::new(2, "Q2: GenAI & RAG", "Generative AI, prompt engineering, RAG systems")
            .with_focus(["Prompt Engineering", "RAG Systems", "Vector Databases", "GenAI Applications"]),
        Quarter::new(3, "Q3: MLOps & System Design", "Production ML, deployment, and system design")
            .with_focus(["ML Pipeline Design", "Model Serving", "Monitoring", "Scalability"]),
        Quarter::new(4, "Q4: Interview Prep & Portfolio Polish", "Final preparation for target roles")
            .with_focus(["System Design Interviews", "ML Design Questions", "Portfolio Review", "Networking"]),
    ])
}

/// The seeded two-year roadmap. Later quarters are outlined without weeks.
pub fn default_roadmap(now: DateTime<Utc>) -> Roadmap {
    Roadmap::new(vec![foundations_year(), specialization_year()], now)
}
