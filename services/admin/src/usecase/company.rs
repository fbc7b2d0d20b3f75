//! Public company branding for unauthenticated pages (login screen).

use serde::Serialize;
use uuid::Uuid;

use fatura_domain::color::{self, DEFAULT_HEX};

use crate::domain::repository::TenantRepository;
use crate::error::AdminServiceError;

/// CSS-ready palette derived from the company's primary color.
#[derive(Debug, Serialize)]
pub struct BrandingPalette {
    pub primary: String,
    pub primary_hover: String,
    pub primary_light: String,
    pub primary_foreground: String,
    /// "h s% l%" value for the `--primary` CSS variable.
    pub primary_hsl: String,
    /// Black or white, whichever reads against `primary`.
    pub contrast_text: String,
}

#[derive(Debug, Serialize)]
pub struct PublicCompany {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub palette: BrandingPalette,
}

pub struct PublicCompanyUseCase<T: TenantRepository> {
    pub tenants: T,
}

impl<T: TenantRepository> PublicCompanyUseCase<T> {
    pub async fn execute(&self) -> Result<PublicCompany, AdminServiceError> {
        let company = self
            .tenants
            .find_first()
            .await?
            .ok_or(AdminServiceError::CompanyNotFound)?;

        // Unset or unparseable colors fall back to the default orange inside
        // the color helpers.
        let base = company
            .primary_color
            .clone()
            .unwrap_or_else(|| DEFAULT_HEX.to_owned());
        let variants = color::color_variants(&base);

        Ok(PublicCompany {
            id: company.id,
            name: company.name,
            logo_url: company.logo_url,
            primary_color: company.primary_color,
            palette: BrandingPalette {
                primary_hsl: color::hsl_var(&base),
                contrast_text: color::contrast_color(&base).to_owned(),
                primary: variants.primary,
                primary_hover: variants.primary_hover,
                primary_light: variants.primary_light,
                primary_foreground: variants.primary_foreground,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use fatura_domain::company::Company;

    struct MockTenants {
        company: Option<Company>,
    }

    impl TenantRepository for MockTenants {
        async fn find_first(&self) -> Result<Option<Company>, AdminServiceError> {
            Ok(self.company.clone())
        }
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Company>, AdminServiceError> {
            Ok(self.company.clone())
        }
        async fn create(&self, _company: &Company) -> Result<(), AdminServiceError> {
            Ok(())
        }
    }

    fn branded_company(primary_color: Option<&str>) -> Company {
        Company {
            primary_color: primary_color.map(str::to_owned),
            logo_url: Some("https://cdn.example.com/logo.png".to_owned()),
            ..Company::bootstrap_default("owner@mail.com", Utc::now())
        }
    }

    #[tokio::test]
    async fn should_derive_palette_from_company_color() {
        let uc = PublicCompanyUseCase {
            tenants: MockTenants {
                company: Some(branded_company(Some("#1E88E5"))),
            },
        };

        let public = uc.execute().await.unwrap();

        assert_eq!(public.primary_color.as_deref(), Some("#1E88E5"));
        assert_eq!(public.palette.primary, "#1E88E5");
        assert_ne!(public.palette.primary_hover, public.palette.primary);
        assert_eq!(public.palette.primary_foreground, "#ffffff");
        assert!(public.palette.primary_hsl.ends_with('%'));
    }

    #[tokio::test]
    async fn should_fall_back_to_default_orange() {
        let uc = PublicCompanyUseCase {
            tenants: MockTenants {
                company: Some(branded_company(None)),
            },
        };

        let public = uc.execute().await.unwrap();

        assert!(public.primary_color.is_none());
        assert_eq!(public.palette.primary, DEFAULT_HEX);
        assert_eq!(public.palette.primary_hsl, "23 100% 63%");
        assert_eq!(public.palette.contrast_text, "#000000");
    }

    #[tokio::test]
    async fn should_fail_when_no_company_exists() {
        let uc = PublicCompanyUseCase {
            tenants: MockTenants { company: None },
        };

        let error = uc.execute().await.unwrap_err();
        assert!(matches!(error, AdminServiceError::CompanyNotFound));
    }
}
