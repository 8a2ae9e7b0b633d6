//! クレジット申請ユースケース
//!
//! クレジットの保存・一覧・コード照会を実装する。
//! 所有顧客の解決と初回支払日の検証はここで行い、
//! ドメイン層は値の不変条件のみを保証する。

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use creditflow_domain::{
    clock::Clock,
    credit::{Credit, CreditCode, CreditId, NewCredit},
    customer::CustomerId,
    value_objects::{CreditValue, InstallmentCount},
};
use creditflow_infra::repository::{CreditRepository, CustomerRepository};

use crate::{error::AppError, usecase::helpers::FindResultExt as _};

/// 初回支払日の許容期間（月数）
const FIRST_INSTALLMENT_WINDOW_MONTHS: u32 = 3;

/// クレジット保存の入力
pub struct SaveCreditInput {
    pub credit_value:           CreditValue,
    pub day_first_installment:  NaiveDate,
    pub number_of_installments: InstallmentCount,
    pub customer_id:            CustomerId,
}

/// クレジット申請ユースケース
pub struct CreditUseCaseImpl {
    credit_repository:   Arc<dyn CreditRepository>,
    customer_repository: Arc<dyn CustomerRepository>,
    clock:               Arc<dyn Clock>,
}

impl CreditUseCaseImpl {
    pub fn new(
        credit_repository: Arc<dyn CreditRepository>,
        customer_repository: Arc<dyn CustomerRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credit_repository,
            customer_repository,
            clock,
        }
    }

    /// クレジットを保存する
    ///
    /// 1. 所有顧客を ID で解決する（存在しない場合は NotFound、
    ///    クレジットストアには一切触れない）
    /// 2. 初回支払日を検証する（過去不可、本日から 3 ヶ月以内）
    /// 3. Credit ドメインオブジェクトを作成し、ちょうど 1 回永続化する
    pub async fn save_credit(&self, input: SaveCreditInput) -> Result<Credit, AppError> {
        // 所有顧客の解決
        self.customer_repository
            .find_by_id(&input.customer_id)
            .await
            .or_not_found("顧客")?;

        // 初回支払日の検証
        let now = self.clock.now();
        self.validate_first_installment(input.day_first_installment, now.date_naive())?;

        let credit = Credit::new(NewCredit {
            id: CreditId::new(),
            credit_value: input.credit_value,
            day_first_installment: input.day_first_installment,
            number_of_installments: input.number_of_installments,
            customer_id: input.customer_id,
            now,
        });

        self.credit_repository.insert(&credit).await?;

        Ok(credit)
    }

    /// 顧客のクレジットを一覧する
    ///
    /// 作成日時順で返す。該当なしは空リスト（エラーではない）。
    pub async fn list_credits_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Credit>, AppError> {
        Ok(self
            .credit_repository
            .find_all_by_customer_id(customer_id)
            .await?)
    }

    /// クレジットコードでクレジットを照会する
    ///
    /// コードが存在しない場合は NotFound。コードは存在するが所有者が
    /// `customer_id` と異なる場合も NotFound を返し、コードの存在を
    /// 漏らさない。
    pub async fn find_credit_by_code(
        &self,
        customer_id: &CustomerId,
        credit_code: &CreditCode,
    ) -> Result<Credit, AppError> {
        let credit = self
            .credit_repository
            .find_by_credit_code(credit_code)
            .await
            .or_not_found("クレジット")?;

        if !credit.is_owned_by(customer_id) {
            return Err(AppError::NotFound(
                "クレジットが見つかりません".to_string(),
            ));
        }

        Ok(credit)
    }

    fn validate_first_installment(&self, day: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
        if day < today {
            return Err(AppError::BadRequest(
                "初回支払日は過去の日付にできません".to_string(),
            ));
        }

        let limit = today
            .checked_add_months(Months::new(FIRST_INSTALLMENT_WINDOW_MONTHS))
            .ok_or_else(|| AppError::Internal("日付の計算に失敗しました".to_string()))?;
        if day > limit {
            return Err(AppError::BadRequest(format!(
                "初回支払日は本日から {} ヶ月以内である必要があります",
                FIRST_INSTALLMENT_WINDOW_MONTHS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use creditflow_domain::{
        clock::FixedClock,
        customer::{
            Address,
            Customer,
            Email,
            FirstName,
            LastName,
            NewCustomer,
            Street,
            TaxId,
            ZipCode,
        },
        password::PasswordHash,
        value_objects::Income,
    };
    use creditflow_infra::mock::{MockCreditRepository, MockCustomerRepository};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;

    /// 2023-06-01 00:00:00 UTC
    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2023-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn build_customer() -> Customer {
        Customer::new(NewCustomer {
            id: CustomerId::new(),
            first_name: FirstName::new("Ana").unwrap(),
            last_name: LastName::new("Maria").unwrap(),
            tax_id: TaxId::new("02730702075").unwrap(),
            email: Email::new("ana@example.com").unwrap(),
            password_hash: PasswordHash::new("$argon2id$dummy"),
            address: Address::new(
                ZipCode::new("123456").unwrap(),
                Street::new("Rua A").unwrap(),
            ),
            income: Income::new(Decimal::new(1000_00, 2)).unwrap(),
            now: fixed_now(),
        })
    }

    fn build_credit(customer_id: CustomerId) -> Credit {
        Credit::new(NewCredit {
            id: CreditId::new(),
            credit_value: CreditValue::new(Decimal::new(500_00, 2)).unwrap(),
            day_first_installment: NaiveDate::from_ymd_opt(2023, 6, 22).unwrap(),
            number_of_installments: InstallmentCount::new(5).unwrap(),
            customer_id,
            now: fixed_now(),
        })
    }

    fn build_input(customer_id: CustomerId) -> SaveCreditInput {
        SaveCreditInput {
            credit_value:           CreditValue::new(Decimal::new(500_00, 2)).unwrap(),
            day_first_installment:  NaiveDate::from_ymd_opt(2023, 6, 22).unwrap(),
            number_of_installments: InstallmentCount::new(5).unwrap(),
            customer_id,
        }
    }

    fn build_usecase(
        credit_repo: MockCreditRepository,
        customer_repo: MockCustomerRepository,
    ) -> CreditUseCaseImpl {
        CreditUseCaseImpl::new(
            Arc::new(credit_repo),
            Arc::new(customer_repo),
            Arc::new(FixedClock::new(fixed_now())),
        )
    }

    #[tokio::test]
    async fn test_保存_既存顧客のクレジットは永続化された実体を返す() {
        // Arrange
        let customer = build_customer();
        let customer_repo = MockCustomerRepository::new();
        customer_repo.add_customer(customer.clone());
        let credit_repo = MockCreditRepository::new();
        let usecase = build_usecase(credit_repo.clone(), customer_repo);

        // Act
        let credit = usecase
            .save_credit(build_input(customer.id().clone()))
            .await
            .unwrap();

        // Assert
        assert_eq!(credit.customer_id(), customer.id());
        assert_eq!(credit.created_at(), fixed_now());
        // 保存はちょうど 1 回
        assert_eq!(credit_repo.insert_call_count(), 1);
    }

    #[tokio::test]
    async fn test_保存_存在しない顧客はnotfoundでストアに触れない() {
        // Arrange
        let credit_repo = MockCreditRepository::new();
        let usecase = build_usecase(credit_repo.clone(), MockCustomerRepository::new());

        // Act
        let err = usecase
            .save_credit(build_input(CustomerId::new()))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(credit_repo.insert_call_count(), 0);
    }

    #[tokio::test]
    async fn test_保存_過去の初回支払日はbad_requestを返す() {
        // Arrange
        let customer = build_customer();
        let customer_repo = MockCustomerRepository::new();
        customer_repo.add_customer(customer.clone());
        let credit_repo = MockCreditRepository::new();
        let usecase = build_usecase(credit_repo.clone(), customer_repo);

        let mut input = build_input(customer.id().clone());
        input.day_first_installment = NaiveDate::from_ymd_opt(2023, 5, 31).unwrap();

        // Act
        let err = usecase.save_credit(input).await.unwrap_err();

        // Assert
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(credit_repo.insert_call_count(), 0);
    }

    #[tokio::test]
    async fn test_保存_3ヶ月を超える初回支払日はbad_requestを返す() {
        // Arrange
        let customer = build_customer();
        let customer_repo = MockCustomerRepository::new();
        customer_repo.add_customer(customer.clone());
        let credit_repo = MockCreditRepository::new();
        let usecase = build_usecase(credit_repo.clone(), customer_repo);

        let mut input = build_input(customer.id().clone());
        // 2023-06-01 の 3 ヶ月後は 2023-09-01。翌日は期限超過
        input.day_first_installment = NaiveDate::from_ymd_opt(2023, 9, 2).unwrap();

        // Act
        let err = usecase.save_credit(input).await.unwrap_err();

        // Assert
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(credit_repo.insert_call_count(), 0);
    }

    #[tokio::test]
    async fn test_保存_期限ちょうどの初回支払日は受け入れる() {
        // Arrange
        let customer = build_customer();
        let customer_repo = MockCustomerRepository::new();
        customer_repo.add_customer(customer.clone());
        let usecase = build_usecase(MockCreditRepository::new(), customer_repo);

        let mut input = build_input(customer.id().clone());
        input.day_first_installment = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();

        // Act & Assert
        assert!(usecase.save_credit(input).await.is_ok());
    }

    #[tokio::test]
    async fn test_一覧_顧客のクレジットをすべて返す() {
        // Arrange
        let customer = build_customer();
        let customer_repo = MockCustomerRepository::new();
        customer_repo.add_customer(customer.clone());
        let credit_repo = MockCreditRepository::new();
        let usecase = build_usecase(credit_repo, customer_repo);

        let first = usecase
            .save_credit(build_input(customer.id().clone()))
            .await
            .unwrap();
        let second = usecase
            .save_credit(build_input(customer.id().clone()))
            .await
            .unwrap();

        // Act
        let credits = usecase
            .list_credits_by_customer(customer.id())
            .await
            .unwrap();

        // Assert
        assert_eq!(credits.len(), 2);
        assert_eq!(credits, vec![first, second]);
    }

    #[tokio::test]
    async fn test_一覧_他の顧客のクレジットは含まれない() {
        // Arrange
        let customer = build_customer();
        let customer_repo = MockCustomerRepository::new();
        customer_repo.add_customer(customer.clone());
        let credit_repo = MockCreditRepository::new();
        let usecase = build_usecase(credit_repo, customer_repo);
        usecase
            .save_credit(build_input(customer.id().clone()))
            .await
            .unwrap();

        // Act
        let credits = usecase
            .list_credits_by_customer(&CustomerId::new())
            .await
            .unwrap();

        // Assert
        assert!(credits.is_empty());
    }

    #[tokio::test]
    async fn test_照会_所有者が一致するクレジットを返す() {
        // Arrange
        let customer = build_customer();
        let customer_repo = MockCustomerRepository::new();
        customer_repo.add_customer(customer.clone());
        let credit_repo = MockCreditRepository::new();
        let usecase = build_usecase(credit_repo.clone(), customer_repo);
        let saved = usecase
            .save_credit(build_input(customer.id().clone()))
            .await
            .unwrap();

        // Act
        let found = usecase
            .find_credit_by_code(customer.id(), saved.credit_code())
            .await
            .unwrap();

        // Assert
        assert_eq!(found, saved);
        // コード照会はちょうど 1 回
        assert_eq!(credit_repo.find_by_code_call_count(), 1);
    }

    #[tokio::test]
    async fn test_照会_存在しないコードはnotfoundを返す() {
        // Arrange
        let usecase = build_usecase(MockCreditRepository::new(), MockCustomerRepository::new());

        // Act
        let err = usecase
            .find_credit_by_code(&CustomerId::new(), &CreditCode::new())
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_照会_所有者が異なる場合はnotfoundを返す() {
        // Arrange: 別の顧客が所有するクレジットをストアに直接用意する
        let credit = build_credit(CustomerId::new());
        let credit_repo = MockCreditRepository::new();
        credit_repo.add_credit(credit.clone());
        let usecase = build_usecase(credit_repo.clone(), MockCustomerRepository::new());

        // Act
        let err = usecase
            .find_credit_by_code(&CustomerId::new(), credit.credit_code())
            .await
            .unwrap_err();

        // Assert: 所有者不一致でもコード照会は 1 回だけ行われる
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(credit_repo.find_by_code_call_count(), 1);
    }
}
